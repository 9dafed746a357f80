//! Outbound email relay for lead forms.
//!
//! Messages are posted to a transactional email API (EmailJS-compatible)
//! as a single JSON request. There are no retries: a failure is reported to
//! the submitter, who can resend or call.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::contact::OutboundMessage;

/// Errors from relaying a message.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The service answered with a non-success status.
    #[error("email service rejected the message ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// The request never completed.
    #[error("email service unreachable: {0}")]
    Transport(String),
    /// Credentials are missing from the configuration.
    #[error("email relay is not configured")]
    NotConfigured,
}

/// Something that can deliver an outbound message.
pub trait EmailRelay: Send + Sync {
    /// Delivers one message. Blocking.
    fn send(&self, message: &OutboundMessage) -> Result<(), RelayError>;
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Clone)]
struct Credentials {
    service_id: String,
    template_id: String,
    public_key: String,
}

/// Relay backed by the EmailJS REST API.
#[derive(Clone)]
pub struct EmailJsRelay {
    endpoint: String,
    credentials: Option<Credentials>,
    client: ureq::Agent,
}

impl std::fmt::Debug for EmailJsRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsRelay")
            .field("endpoint", &self.endpoint)
            .field("configured", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl EmailJsRelay {
    /// Builds a relay from configuration.
    ///
    /// Missing credentials do not fail here; every send then returns
    /// [`RelayError::NotConfigured`].
    #[must_use]
    pub fn from_config(config: &RelayConfig) -> Self {
        let credentials = if config.has_credentials() {
            Some(Credentials {
                service_id: config.service_id.clone().unwrap_or_default(),
                template_id: config.template_id.clone().unwrap_or_default(),
                public_key: config.public_key.clone().unwrap_or_default(),
            })
        } else {
            None
        };

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();

        Self {
            endpoint: config.endpoint.clone(),
            credentials,
            client,
        }
    }

    /// True if credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn request_body(
        credentials: &Credentials,
        message: &OutboundMessage,
    ) -> serde_json::Result<String> {
        serde_json::to_string(&SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: TemplateParams {
                from_name: &message.from_name,
                reply_to: &message.reply_to,
                subject: &message.subject,
                message: &message.message,
            },
        })
    }
}

impl EmailRelay for EmailJsRelay {
    fn send(&self, message: &OutboundMessage) -> Result<(), RelayError> {
        let Some(credentials) = &self.credentials else {
            warn!("Email relay has no credentials; dropping {:?} lead", message.kind);
            return Err(RelayError::NotConfigured);
        };

        let body = Self::request_body(credentials, message)
            .map_err(|e| RelayError::Transport(format!("failed to encode request: {e}")))?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "Posting lead to email service");

        match self
            .client
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(response) => {
                info!(status = response.status(), kind = ?message.kind, "Lead relayed");
                Ok(())
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(RelayError::Rejected { status, body })
            }
            Err(other) => Err(RelayError::Transport(other.to_string())),
        }
    }
}
