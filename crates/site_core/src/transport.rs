use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ContactRequest, ContactResponse, CONTACT_ROUTE};
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, TransportError>;
}

/// JSON `POST /contact` over HTTP. No timeout is applied to the request.
pub struct HttpContactTransport {
    http: Client,
    endpoint: Url,
}

impl HttpContactTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidUrl {
            url: server_url.to_string(),
            reason,
        };
        let base = Url::parse(server_url).map_err(|e| invalid(e.to_string()))?;
        let endpoint = base.join(CONTACT_ROUTE).map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn send_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, TransportError> {
        let res = self.http.post(self.endpoint.clone()).json(request).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        match serde_json::from_slice::<ContactResponse>(&body) {
            Ok(response) if status.is_success() => Ok(response),
            Ok(response) => Ok(ContactResponse {
                success: false,
                message: response.message,
                error: response
                    .error
                    .or_else(|| Some(format!("server responded with status {}", status.as_u16()))),
            }),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
            }),
            Err(error) => Err(TransportError::Decode(error.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
