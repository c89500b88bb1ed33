use crate::config::Config;
use crate::resume::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backed by the process-wide pattern catalog, compiled before the server starts.
    pub parser: ResumeParser,
}
