use std::sync::Arc;
use crate::domain::{
    models::delivery::{
        DeliveryDecision, DeliveryPolicy, InviteNotice, InvitePayload, InviteRequest, InviteState, NoticeKind,
    },
    ports::InviteTransport,
    services::calendar::build_calendar_document,
};
use tracing::{error, info, warn};

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send calendar invite";

/// Drives one "send invite" interaction: idle -> sending -> sent | failed.
///
/// Holds no request identity. Callers must not run two sends for the same
/// logical request at once; `&mut self` keeps a single instance from doing so.
pub struct InviteDelivery {
    transport: Arc<dyn InviteTransport>,
    default_sender: String,
    state: InviteState,
    error: Option<String>,
    notice: Option<InviteNotice>,
    confirmation_visible: bool,
}

impl InviteDelivery {
    pub fn new(transport: Arc<dyn InviteTransport>, default_sender: String) -> Self {
        Self {
            transport,
            default_sender,
            state: InviteState::Idle,
            error: None,
            notice: None,
            confirmation_visible: false,
        }
    }

    pub fn state(&self) -> InviteState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == InviteState::Sending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&InviteNotice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Whether an "ask" policy is waiting on the user.
    pub fn confirmation_visible(&self) -> bool {
        self.confirmation_visible
    }

    pub fn dismiss_confirmation(&mut self) {
        self.confirmation_visible = false;
    }

    /// Routes a request through the delivery policy. Only `Automatic` reaches the transport.
    pub async fn apply_policy(&mut self, policy: DeliveryPolicy, request: &InviteRequest) -> InviteState {
        match policy.decide() {
            DeliveryDecision::Dispatch => self.send(request).await,
            DeliveryDecision::AwaitConfirmation => {
                info!("Invite delivery awaiting user confirmation");
                self.confirmation_visible = true;
                self.state
            }
            DeliveryDecision::Skip => self.state,
        }
    }

    /// The user accepted the confirmation prompt.
    pub async fn confirm(&mut self, request: &InviteRequest) -> InviteState {
        self.confirmation_visible = false;
        self.send(request).await
    }

    pub async fn send(&mut self, request: &InviteRequest) -> InviteState {
        let Some(recipient) = request.recipient.as_deref().map(str::trim).filter(|r| !r.is_empty()) else {
            warn!("No recipient address for invite, skipping delivery");
            return self.state;
        };

        self.state = InviteState::Sending;
        self.error = None;

        let payload = build_payload(recipient, request, &self.default_sender);
        let outcome = self.transport.deliver(&payload).await;

        // every exit path leaves Sending here
        match outcome {
            Ok(()) => {
                info!("Calendar invite sent to {}", recipient);
                self.state = InviteState::Sent;
                self.notice = Some(InviteNotice {
                    kind: NoticeKind::Success,
                    message: format!("Calendar invite sent to {}", recipient),
                });
            }
            Err(e) => {
                let message = e.message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                error!("Calendar invite to {} failed: {}", recipient, message);
                self.state = InviteState::Failed;
                self.error = Some(message.clone());
                self.notice = Some(InviteNotice { kind: NoticeKind::Error, message });
            }
        }
        self.state
    }
}

fn build_payload(recipient: &str, request: &InviteRequest, default_sender: &str) -> InvitePayload {
    let event = &request.event;
    let document = build_calendar_document(event);

    InvitePayload {
        recipient: recipient.to_string(),
        title: event.title.clone(),
        description: event.description.clone().unwrap_or_default(),
        location: event.location.clone().unwrap_or_default(),
        start_time: event.start_time.to_rfc3339(),
        end_time: event.effective_end().to_rfc3339(),
        ics: document.to_ics_string(),
        sender_name: request.sender_name.clone().unwrap_or_else(|| default_sender.to_string()),
        event_url: event.url.clone(),
    }
}
