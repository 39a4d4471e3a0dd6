use certwatch_domain::EnrichedDomain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateDomainRequest {
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct CreateDomainResponse {
    pub message: String,
    pub domain: EnrichedDomain,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
