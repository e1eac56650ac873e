//! Client entry points.
//!
//! Keep the public surface small: build an [`OrquestaClient`], then call the
//! [`Deployments`] facade it hands out.

pub mod builder;
pub mod core;
pub mod deployments;
pub mod params;

pub use builder::OrquestaClientBuilder;
pub use core::OrquestaClient;
pub use deployments::Deployments;
pub use params::InvokeParams;
