use serde::Serialize;
use std::fmt;

/// Named states of the per-ticker detail pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetailPhase {
    Init,
    LoadingHistory,
    HistoryReady,
    HistoryFailed,
    LoadingAnalysis,
    AnalysisReady,
    AnalysisFailed,
}

impl DetailPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailPhase::Init => "INIT",
            DetailPhase::LoadingHistory => "LOADING_HISTORY",
            DetailPhase::HistoryReady => "HISTORY_READY",
            DetailPhase::HistoryFailed => "HISTORY_FAILED",
            DetailPhase::LoadingAnalysis => "LOADING_ANALYSIS",
            DetailPhase::AnalysisReady => "ANALYSIS_READY",
            DetailPhase::AnalysisFailed => "ANALYSIS_FAILED",
        }
    }

    /// History is available, whatever happened to the analysis afterwards
    pub fn has_history(&self) -> bool {
        matches!(
            self,
            DetailPhase::HistoryReady
                | DetailPhase::LoadingAnalysis
                | DetailPhase::AnalysisReady
                | DetailPhase::AnalysisFailed
        )
    }
}

impl fmt::Display for DetailPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inputs that move the detail pipeline between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetailEvent {
    HistoryRequested,
    HistoryLoaded,
    HistoryRejected,
    AnalysisRequested,
    AnalysisLoaded,
    AnalysisRejected,
}

impl DetailEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailEvent::HistoryRequested => "HISTORY_REQUESTED",
            DetailEvent::HistoryLoaded => "HISTORY_LOADED",
            DetailEvent::HistoryRejected => "HISTORY_REJECTED",
            DetailEvent::AnalysisRequested => "ANALYSIS_REQUESTED",
            DetailEvent::AnalysisLoaded => "ANALYSIS_LOADED",
            DetailEvent::AnalysisRejected => "ANALYSIS_REJECTED",
        }
    }
}

impl fmt::Display for DetailEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
