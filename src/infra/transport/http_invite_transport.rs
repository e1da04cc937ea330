use crate::domain::{models::delivery::InvitePayload, ports::InviteTransport};
use crate::error::TransportError;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct HttpInviteTransport {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpInviteTransport {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct AttachmentPayload {
    filename: String,
    content_type: &'static str,
    content_base64: String,
}

#[derive(Serialize)]
struct InviteRequestBody<'a> {
    #[serde(flatten)]
    invite: &'a InvitePayload,
    attachments: Vec<AttachmentPayload>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[async_trait]
impl InviteTransport for HttpInviteTransport {
    async fn deliver(&self, payload: &InvitePayload) -> Result<(), TransportError> {
        let body = InviteRequestBody {
            invite: payload,
            attachments: vec![AttachmentPayload {
                filename: "invite.ics".to_string(),
                content_type: "text/calendar; charset=utf-8; method=PUBLISH",
                content_base64: general_purpose::STANDARD.encode(payload.ics.as_bytes()),
            }],
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Invite service connection error: {}", e);
                error!("{}", msg);
                TransportError::new(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            error!("Invite service failed. Status: {}, Body: {}", status, text);
            let parsed: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            return Err(TransportError { message: parsed.error.or(parsed.message) });
        }

        Ok(())
    }
}
