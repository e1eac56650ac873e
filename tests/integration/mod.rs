//! Integration tests with mock HTTP server

pub mod deployments;
pub mod error_handling;
pub mod mock_server;
pub mod streaming;
