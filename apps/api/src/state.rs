use std::sync::Arc;

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Stateless flow controller shared by every session.
    pub controller: Arc<InterviewController>,
    pub config: Config,
}
