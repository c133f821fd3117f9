use serde::Serialize;
use std::fmt;

/// Lifecycle stage of one request slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Loading => "LOADING",
            Phase::Success => "SUCCESS",
            Phase::Error => "ERROR",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data, phase and error message of one request slot.
///
/// Fields are only changed through the transition methods, which keep these
/// invariants:
/// - `Success` has data and no error message
/// - `Error` has an error message
/// - `Loading` keeps whatever data was present before
///
/// A failure never touches `data`: the last good value stays readable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestState<T> {
    data: Option<T>,
    phase: Phase,
    error_message: Option<String>,
}

impl<T> RequestState<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            phase: Phase::Idle,
            error_message: None,
        }
    }

    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.error_message = None;
    }

    /// Replace the data wholesale
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.phase = Phase::Success;
        self.error_message = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error;
        self.error_message = Some(message.into());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_success(&self) -> bool {
        self.phase == Phase::Success
    }

    pub fn is_error(&self) -> bool {
        self.phase == Phase::Error
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let state: RequestState<Vec<u32>> = RequestState::default();
        assert!(state.is_idle());
        assert!(state.data().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_loading_keeps_previous_data() {
        let mut state = RequestState::idle();
        state.succeed(vec![1, 2, 3]);
        state.begin_loading();
        assert!(state.is_loading());
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_success_clears_error() {
        let mut state = RequestState::idle();
        state.fail("boom");
        state.begin_loading();
        assert!(state.error_message().is_none());
        state.succeed(7);
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.data(), Some(&7));
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_failure_keeps_last_good_value() {
        let mut state = RequestState::idle();
        state.succeed("first".to_string());
        state.begin_loading();
        state.fail("Failed to fetch stock data. Please try again later.");
        assert!(state.is_error());
        assert_eq!(state.data().map(String::as_str), Some("first"));
        assert_eq!(
            state.error_message(),
            Some("Failed to fetch stock data. Please try again later.")
        );
    }
}
