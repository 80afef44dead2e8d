use serde::Serialize;
use tracing::info;

/// Account and record actions worth an audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Signup,
    Login,
    PasswordReset,
    Logout,
    ResultCreated,
    ResultsRead,
    VoiceAnalysisCreated,
    VoiceAnalysesRead,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Signup => "signup",
            Action::Login => "login",
            Action::PasswordReset => "password_reset",
            Action::Logout => "logout",
            Action::ResultCreated => "result_created",
            Action::ResultsRead => "results_read",
            Action::VoiceAnalysisCreated => "voice_analysis_created",
            Action::VoiceAnalysesRead => "voice_analyses_read",
        }
    }
}

/// A structured audit event.
///
/// `user_sub` is the authenticated identity, or the claimed identity for
/// unauthenticated account actions. Never put secrets in `details`.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: Action,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: Action,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_sub: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_sub: user_sub.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_sub = %self.user_sub,
            audit.details = %details,
            "audit event"
        );
    }
}
