//! The compose hook — the observer the host invokes right before finalizing
//! a composed reply.
//!
//! The hook may only read the compose payload and set one output flag; it has
//! no other access to the host. Registration happens once at startup. If the
//! host's interception point cannot be located, the evaluation boundary is
//! disabled — reported once, never a panic — while the mutation boundary
//! keeps working.

use crate::extract;
use replygate_core::{HostError, ReplyContext};
use replygate_policy::MentionPolicy;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

/// A reply about to be finalized by the host.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    /// Whatever shape the host's compose pipeline carries.
    pub payload: Value,
    /// The mention flag the hook overwrites.
    pub should_mention: bool,
}

/// The callback the host invokes once per composed reply.
pub type ComposeHook = Box<dyn Fn(&mut ComposeRequest) + Send + Sync>;

/// The seam the host exposes for hook registration.
pub trait HostBridge: Send + Sync {
    /// Register the hook, or fail with [`HostError::SeamUnavailable`] when
    /// the interception point cannot be located.
    fn register_compose_hook(&self, hook: ComposeHook) -> Result<(), HostError>;
}

/// Tracks the currently selected server.
///
/// Used as a fallback when the compose payload itself carries no server id;
/// if neither source knows a server, the reply is treated as a DM.
#[derive(Debug, Default)]
pub struct ContextTracker {
    current_server: RwLock<Option<String>>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the server the user navigated into.
    pub fn enter_server(&self, server_id: impl Into<String>) {
        let id = server_id.into();
        *self.current_server.write().unwrap() = (!id.is_empty()).then_some(id);
    }

    /// Record leaving server context (a DM view, a home screen).
    pub fn clear(&self) {
        *self.current_server.write().unwrap() = None;
    }

    pub fn current_server(&self) -> Option<String> {
        self.current_server.read().unwrap().clone()
    }
}

/// Build the decision context for one compose payload.
fn context_for(payload: &Value, tracker: &ContextTracker) -> ReplyContext {
    let target_user_id = extract::target_user_id(payload);
    let server_id = extract::server_id(payload).or_else(|| tracker.current_server());
    let is_dm = server_id.is_none();
    ReplyContext {
        target_user_id,
        server_id,
        is_dm,
    }
}

/// Wire the policy into the host's compose pipeline.
///
/// On success the host invokes the hook once per composed reply; the hook
/// extracts identity, asks the policy, and sets `should_mention`.
pub fn install(
    bridge: &dyn HostBridge,
    policy: Arc<MentionPolicy>,
    tracker: Arc<ContextTracker>,
) -> Result<(), HostError> {
    let hook: ComposeHook = Box::new(move |request| {
        let ctx = context_for(&request.payload, &tracker);
        request.should_mention = policy.should_mention(&ctx);
    });

    match bridge.register_compose_hook(hook) {
        Ok(()) => {
            debug!("Compose hook installed");
            Ok(())
        }
        Err(e) => {
            error!(
                error = %e,
                "Unable to install compose hook; mention decisions are disabled"
            );
            Err(e)
        }
    }
}
