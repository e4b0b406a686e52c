//! The per-decision evaluation context.

/// Inputs for a single mention decision.
///
/// One `ReplyContext` is built per outgoing reply and discarded after the
/// decision. Both identity fields may legitimately be absent — a missing
/// target user or server simply never matches the corresponding rules; it is
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyContext {
    /// The user being replied to, if known.
    pub target_user_id: Option<String>,

    /// The server the reply is composed in. `None` for DMs.
    pub server_id: Option<String>,

    /// Whether this is a direct (serverless) conversation.
    pub is_dm: bool,
}

impl ReplyContext {
    /// A reply inside a server.
    pub fn in_server(target_user_id: impl Into<String>, server_id: impl Into<String>) -> Self {
        Self {
            target_user_id: Some(target_user_id.into()),
            server_id: Some(server_id.into()),
            is_dm: false,
        }
    }

    /// A reply in a direct conversation.
    pub fn dm(target_user_id: impl Into<String>) -> Self {
        Self {
            target_user_id: Some(target_user_id.into()),
            server_id: None,
            is_dm: true,
        }
    }

    /// The target user id, with empty strings treated as absent.
    pub fn target_user(&self) -> Option<&str> {
        self.target_user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The server id, with empty strings treated as absent.
    pub fn server(&self) -> Option<&str> {
        self.server_id.as_deref().filter(|id| !id.is_empty())
    }
}
