//! Revert outcome reporting.

/// Outcome of a profile restore.
///
/// Every expected failure is a value of this enum rather than an unwound
/// error, so callers can branch on the exact step that gave up. A failed
/// step leaves the system in whatever partially-applied state the last
/// successful step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertResult {
    /// Full success, no further action needed.
    Ok,

    /// The display subsystem cannot be queried right now; retry later.
    ApiTemporarilyUnavailable,

    /// A topology read from the system or embedded in the profile failed
    /// the validity check; retrying with the same profile will not help.
    TopologyIsInvalid,

    /// The profile buffer was malformed or the persisted state could not be
    /// saved; treat as non-retryable corruption.
    PersistenceSaveFailed,

    /// Applying a topology failed.
    SwitchingTopologyFailed,

    /// Applying the captured HDR states failed.
    RevertingHdrStatesFailed,

    /// Applying the captured display modes failed.
    RevertingDisplayModesFailed,

    /// Applying the captured primary device failed.
    RevertingPrimaryDeviceFailed,
}

impl RevertResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, RevertResult::Ok)
    }

    /// Whether retrying the same call later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RevertResult::ApiTemporarilyUnavailable)
    }

    /// Get a human-readable description of this outcome.
    pub fn description(&self) -> &'static str {
        match self {
            RevertResult::Ok => "Ok",
            RevertResult::ApiTemporarilyUnavailable => "display API temporarily unavailable",
            RevertResult::TopologyIsInvalid => "topology is invalid",
            RevertResult::PersistenceSaveFailed => "persistence save failed",
            RevertResult::SwitchingTopologyFailed => "switching topology failed",
            RevertResult::RevertingHdrStatesFailed => "reverting HDR states failed",
            RevertResult::RevertingDisplayModesFailed => "reverting display modes failed",
            RevertResult::RevertingPrimaryDeviceFailed => "reverting primary device failed",
        }
    }
}

impl std::fmt::Display for RevertResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
