use super::{DetailEvent, DetailPhase};

use DetailEvent::*;
use DetailPhase::*;

/// Every allowed (state, event) → state move of the detail pipeline.
/// Pairs missing from this table are rejected.
const TRANSITIONS: &[(DetailPhase, DetailEvent, DetailPhase)] = &[
    (Init, HistoryRequested, LoadingHistory),
    (LoadingHistory, HistoryLoaded, HistoryReady),
    (LoadingHistory, HistoryRejected, HistoryFailed),
    (HistoryReady, AnalysisRequested, LoadingAnalysis),
    // A manual trigger while one is outstanding is allowed to proceed
    (LoadingAnalysis, AnalysisRequested, LoadingAnalysis),
    (LoadingAnalysis, AnalysisLoaded, AnalysisReady),
    (LoadingAnalysis, AnalysisRejected, AnalysisFailed),
    (AnalysisReady, AnalysisRequested, LoadingAnalysis),
    (AnalysisFailed, AnalysisRequested, LoadingAnalysis),
];

/// Events raised automatically on entering a state
const FOLLOW_UPS: &[(DetailPhase, DetailEvent)] = &[(HistoryReady, AnalysisRequested)];

/// Transition table lookups for the detail pipeline
pub struct DetailTransitions;

impl DetailTransitions {
    /// Target state for `event` in `from`, if the table allows it
    pub fn next(from: DetailPhase, event: DetailEvent) -> Option<DetailPhase> {
        TRANSITIONS
            .iter()
            .find(|(state, ev, _)| *state == from && *ev == event)
            .map(|(_, _, to)| *to)
    }

    /// Event to raise immediately after entering `state`
    pub fn follow_up(state: DetailPhase) -> Option<DetailEvent> {
        FOLLOW_UPS
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, event)| *event)
    }

    /// Events the pipeline accepts in `state`
    pub fn accepted_events(state: DetailPhase) -> Vec<DetailEvent> {
        TRANSITIONS
            .iter()
            .filter(|(s, _, _)| *s == state)
            .map(|(_, event, _)| *event)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_then_analysis_path() {
        assert_eq!(DetailTransitions::next(Init, HistoryRequested), Some(LoadingHistory));
        assert_eq!(DetailTransitions::next(LoadingHistory, HistoryLoaded), Some(HistoryReady));
        assert_eq!(DetailTransitions::follow_up(HistoryReady), Some(AnalysisRequested));
        assert_eq!(DetailTransitions::next(HistoryReady, AnalysisRequested), Some(LoadingAnalysis));
        assert_eq!(DetailTransitions::next(LoadingAnalysis, AnalysisLoaded), Some(AnalysisReady));
    }

    #[test]
    fn test_history_failure_is_terminal() {
        assert_eq!(DetailTransitions::next(LoadingHistory, HistoryRejected), Some(HistoryFailed));
        assert!(DetailTransitions::accepted_events(HistoryFailed).is_empty());
        assert_eq!(DetailTransitions::follow_up(HistoryFailed), None);
        assert_eq!(DetailTransitions::next(HistoryFailed, AnalysisRequested), None);
    }

    #[test]
    fn test_analysis_needs_history() {
        assert_eq!(DetailTransitions::next(Init, AnalysisRequested), None);
        assert_eq!(DetailTransitions::next(LoadingHistory, AnalysisRequested), None);
    }

    #[test]
    fn test_analysis_failure_keeps_retrigger() {
        assert_eq!(DetailTransitions::next(LoadingAnalysis, AnalysisRejected), Some(AnalysisFailed));
        assert_eq!(DetailTransitions::next(AnalysisFailed, AnalysisRequested), Some(LoadingAnalysis));
        assert!(AnalysisFailed.has_history());
    }

    #[test]
    fn test_no_way_back_to_history_loading() {
        for state in [HistoryReady, LoadingAnalysis, AnalysisReady, AnalysisFailed] {
            assert!(TRANSITIONS.iter().all(|(from, _, to)| *from != state || *to != LoadingHistory));
            assert!(!DetailTransitions::accepted_events(state).contains(&HistoryRequested));
        }
    }
}
