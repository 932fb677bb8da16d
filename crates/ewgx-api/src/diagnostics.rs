//! Where recovered failures get reported.
//!
//! Read operations never return their errors, so the only trace of a CMS
//! outage is what lands here. The default sink emits `tracing` events;
//! tests plug in a recorder or [`SilentDiagnostics`].

use std::error::Error as StdError;

use crate::error::Error;

/// Sink for failures that were handled without reaching the caller.
pub trait Diagnostics: Send + Sync {
    /// `operation` names the failing call, e.g. `"hero_slides"`.
    fn report(&self, operation: &str, error: &(dyn StdError + 'static));
}

/// Logs each failure as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, operation: &str, error: &(dyn StdError + 'static)) {
        let api = error.downcast_ref::<Error>();
        let code = api.and_then(Error::api_error_code);
        // a missing collection or route is a content gap, not an outage
        if api.is_some_and(Error::is_not_found) {
            tracing::warn!(operation, code, error = %error, "content not found");
        } else {
            tracing::error!(operation, code, error = %error, "content operation failed");
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn report(&self, _operation: &str, _error: &(dyn StdError + 'static)) {}
}
