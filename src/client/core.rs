use crate::client::builder::OrquestaClientBuilder;
use crate::client::deployments::Deployments;
use crate::options::ClientOptions;
use crate::transport::Transport;
use crate::Result;
use std::sync::Arc;

/// Entry point of the SDK. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct OrquestaClient {
    options: Arc<ClientOptions>,
    transport: Arc<dyn Transport>,
}

impl OrquestaClient {
    /// Create a client configured from the environment.
    pub fn new() -> Result<Self> {
        OrquestaClientBuilder::new().build()
    }

    pub fn builder() -> OrquestaClientBuilder {
        OrquestaClientBuilder::new()
    }

    pub(crate) fn from_parts(options: Arc<ClientOptions>, transport: Arc<dyn Transport>) -> Self {
        Self { options, transport }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn deployments(&self) -> Deployments {
        Deployments::new(self.options.clone(), self.transport.clone())
    }
}

impl std::fmt::Debug for OrquestaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrquestaClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
