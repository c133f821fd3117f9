pub mod states;
pub mod transitions;

pub use states::*;
pub use transitions::*;

use crate::{error::TransitionError, models::StateTransitionLog, utils::log_state_transition};

const MAX_HISTORY: usize = 100;

/// Current state of one detail pipeline plus the transitions that led there
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    context: String,
    current: DetailPhase,
    history: Vec<StateTransitionLog>,
}

impl PhaseTracker {
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
            current: DetailPhase::Init,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> DetailPhase {
        self.current
    }

    /// Whether `event` would be accepted right now
    pub fn accepts(&self, event: DetailEvent) -> bool {
        DetailTransitions::next(self.current, event).is_some()
    }

    /// Apply `event`, returning the new state. Rejected events leave the state untouched.
    pub fn apply(&mut self, event: DetailEvent) -> Result<DetailPhase, TransitionError> {
        let to = DetailTransitions::next(self.current, event).ok_or(TransitionError {
            state: self.current.as_str(),
            event: event.as_str(),
        })?;

        let from = self.current;
        log_state_transition(&self.context, from.as_str(), to.as_str(), event.as_str());

        self.history.push(StateTransitionLog::new(
            from.as_str().to_string(),
            to.as_str().to_string(),
            event.as_str().to_string(),
        ));

        // Keep history manageable
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }

        self.current = to;
        Ok(to)
    }

    /// Event the table raises automatically for the current state
    pub fn pending_follow_up(&self) -> Option<DetailEvent> {
        DetailTransitions::follow_up(self.current)
    }

    pub fn history(&self) -> &[StateTransitionLog] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_records_history() {
        let mut tracker = PhaseTracker::new("DETAIL:AAPL");
        assert_eq!(tracker.apply(DetailEvent::HistoryRequested), Ok(DetailPhase::LoadingHistory));
        assert_eq!(tracker.apply(DetailEvent::HistoryLoaded), Ok(DetailPhase::HistoryReady));
        assert_eq!(tracker.pending_follow_up(), Some(DetailEvent::AnalysisRequested));

        let history = tracker.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].from, "INIT");
        assert_eq!(history[1].to, "HISTORY_READY");
        assert_eq!(history[1].reason, "HISTORY_LOADED");
    }

    #[test]
    fn test_rejected_event_leaves_state() {
        let mut tracker = PhaseTracker::new("DETAIL:ZZZZ");
        let err = tracker.apply(DetailEvent::AnalysisRequested).unwrap_err();
        assert_eq!(err.state, "INIT");
        assert_eq!(err.event, "ANALYSIS_REQUESTED");
        assert_eq!(tracker.current(), DetailPhase::Init);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = PhaseTracker::new("DETAIL:NVDA");
        tracker.apply(DetailEvent::HistoryRequested).unwrap();
        tracker.apply(DetailEvent::HistoryLoaded).unwrap();
        for _ in 0..150 {
            tracker.apply(DetailEvent::AnalysisRequested).unwrap();
        }
        assert_eq!(tracker.history().len(), MAX_HISTORY);
        assert_eq!(tracker.current(), DetailPhase::LoadingAnalysis);
    }
}
