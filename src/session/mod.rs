//! Interactive fetch session state.
//!
//! Models the lifecycle of one interactive transcript fetch as an explicit
//! state machine, decoupled from any rendering surface. A frontend drives
//! the transitions and renders `status_line()` / `can_save()` however it
//! likes.

use crate::pipeline::FetchResult;

/// Phase of the current fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    Loaded,
    Failed,
}

/// One interactive session: at most one fetch in flight, the loaded result
/// (if any), and the current user-facing status line.
#[derive(Debug)]
pub struct FetchSession {
    phase: FetchPhase,
    result: Option<FetchResult>,
    status: String,
}

impl FetchSession {
    pub fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            result: None,
            status: String::new(),
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Current user-facing status line.
    pub fn status_line(&self) -> &str {
        &self.status
    }

    /// Whether the loaded transcript and synopsis may be saved.
    pub fn can_save(&self) -> bool {
        self.phase == FetchPhase::Loaded
    }

    /// The loaded result, present only in the `Loaded` phase.
    pub fn result(&self) -> Option<&FetchResult> {
        self.result.as_ref()
    }

    /// Start a fetch. Rejected while another fetch is in flight.
    pub fn begin(&mut self) -> bool {
        if self.phase == FetchPhase::Fetching {
            return false;
        }
        self.phase = FetchPhase::Fetching;
        self.result = None;
        self.status = "Fetching transcript...".to_string();
        true
    }

    /// Record a successful fetch.
    pub fn loaded(&mut self, result: FetchResult) {
        self.phase = FetchPhase::Loaded;
        self.result = Some(result);
        self.status = "Transcript loaded.".to_string();
    }

    /// Record a failed fetch with its user-facing message.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.phase = FetchPhase::Failed;
        self.result = None;
        self.status = message.into();
    }

    /// Clear everything back to the idle state.
    pub fn reset(&mut self) {
        self.phase = FetchPhase::Idle;
        self.result = None;
        self.status.clear();
    }
}

impl Default for FetchSession {
    fn default() -> Self {
        Self::new()
    }
}
