//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureInconsistencyDetection, InconsistencyDetection};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub detection: Arc<dyn InconsistencyDetection>,
}

impl HttpState {
    /// Construct state from the detection use-case.
    pub fn new(detection: Arc<dyn InconsistencyDetection>) -> Self {
        Self { detection }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureInconsistencyDetection))
    }
}
