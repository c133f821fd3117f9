use crate::{
    config::ClientConfig,
    error::{FetchResult, TransitionError, ANALYSIS_FAILED, HISTORY_LOAD_FAILED},
    models::{normalize_ticker, HistoryPoint, RequestState, StateTransitionLog, StockAnalysis, StockHistory},
    services::{HttpStockService, StockDataSource},
    state_machine::{DetailEvent, DetailPhase, DetailTransitions, PhaseTracker},
    utils::{lock_state, log_stale_response, Logger},
};
use serde::Serialize;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Read-only copy of the detail view state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub ticker: String,
    pub phase: DetailPhase,
    pub company_name: String,
    pub history: RequestState<Vec<HistoryPoint>>,
    pub analysis: RequestState<StockAnalysis>,
}

impl DetailView {
    /// Most recent sample of the series
    pub fn latest_close(&self) -> Option<&HistoryPoint> {
        self.history.data().and_then(|points| points.last())
    }

    /// A history failure hides the chart and the analysis panel
    pub fn shows_chart(&self) -> bool {
        self.history.is_success()
    }

    /// The re-analysis trigger is disabled while an analysis is outstanding
    pub fn analysis_trigger_enabled(&self) -> bool {
        self.phase.has_history() && !self.analysis.is_loading()
    }
}

/// Everything known about one ticker. Replaced wholesale on navigation.
struct Session {
    id: u64,
    ticker: String,
    tracker: PhaseTracker,
    company_name: String,
    history: RequestState<Vec<HistoryPoint>>,
    analysis: RequestState<StockAnalysis>,
    analysis_generation: u64,
}

impl Session {
    fn new(id: u64, ticker: String) -> Self {
        Self {
            id,
            tracker: PhaseTracker::new(&format!("DETAIL:{}", ticker)),
            ticker,
            company_name: String::new(),
            history: RequestState::idle(),
            analysis: RequestState::idle(),
            analysis_generation: 0,
        }
    }

    fn begin_analysis(&mut self) -> Result<AnalysisTicket, TransitionError> {
        self.tracker.apply(DetailEvent::AnalysisRequested)?;
        self.analysis_generation += 1;
        self.analysis.begin_loading();

        Ok(AnalysisTicket {
            session: self.id,
            generation: self.analysis_generation,
            ticker: self.ticker.clone(),
        })
    }
}

struct DetailInner {
    last_session: u64,
    session: Session,
}

#[derive(Debug, Clone)]
struct AnalysisTicket {
    session: u64,
    generation: u64,
    ticker: String,
}

/// Two-phase loader for a single ticker: price history first, then analysis
#[derive(Clone)]
pub struct DetailOrchestrator {
    source: Arc<dyn StockDataSource>,
    inner: Arc<Mutex<DetailInner>>,
    logger: Logger,
}

impl DetailOrchestrator {
    pub fn new(config: &ClientConfig, ticker: &str) -> FetchResult<Self> {
        Ok(Self::with_source(Arc::new(HttpStockService::new(config)?), ticker))
    }

    pub fn with_source(source: Arc<dyn StockDataSource>, ticker: &str) -> Self {
        let ticker = normalize_ticker(ticker).unwrap_or_default();
        Self {
            source,
            inner: Arc::new(Mutex::new(DetailInner {
                last_session: 1,
                session: Session::new(1, ticker),
            })),
            logger: Logger::new("DETAIL"),
        }
    }

    pub fn ticker(&self) -> String {
        lock_state(&self.inner).session.ticker.clone()
    }

    pub fn phase(&self) -> DetailPhase {
        lock_state(&self.inner).session.tracker.current()
    }

    pub fn snapshot(&self) -> DetailView {
        let inner = lock_state(&self.inner);
        let session = &inner.session;
        DetailView {
            ticker: session.ticker.clone(),
            phase: session.tracker.current(),
            company_name: session.company_name.clone(),
            history: session.history.clone(),
            analysis: session.analysis.clone(),
        }
    }

    /// Transitions taken by the current ticker's pipeline
    pub fn transition_history(&self) -> Vec<StateTransitionLog> {
        lock_state(&self.inner).session.tracker.history().to_vec()
    }

    /// Load the ticker this orchestrator was created for
    pub fn load(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticker = self.ticker();
        self.load_history(&ticker)
    }

    /// Switch to another ticker, discarding everything known about the current one
    pub fn navigate(&self, ticker: &str) -> impl Future<Output = ()> + Send + 'static {
        let current = self.ticker();
        self.logger.info(&format!("Navigating {} → {}", current, ticker.trim()));
        self.load_history(ticker)
    }

    /// Start a fresh session for `ticker` and fetch its history.
    ///
    /// On success the returned future goes on to run the analysis request
    /// raised by the transition table; on failure no analysis is attempted.
    pub fn load_history(&self, ticker: &str) -> impl Future<Output = ()> + Send + 'static {
        let started = self.begin_history(ticker);
        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        let logger = self.logger.clone();

        async move {
            let Some((session_id, ticker)) = started else {
                return;
            };

            let result = source.history(&ticker).await;
            let follow_up = Self::complete_history(&inner, &logger, session_id, result);

            if let Some(ticket) = follow_up {
                run_analysis(source, inner, logger, ticket).await;
            }
        }
    }

    /// Ask for a new analysis of the current ticker.
    ///
    /// Allowed once history is loaded, including while another analysis is
    /// outstanding; the latest request wins.
    pub fn request_analysis(&self, ticker: &str) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin_manual_analysis(ticker);
        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        let logger = self.logger.clone();

        async move {
            if let Some(ticket) = ticket {
                run_analysis(source, inner, logger, ticket).await;
            }
        }
    }

    /// Re-analyse whatever ticker is currently shown
    pub fn refresh_analysis(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticker = self.ticker();
        self.request_analysis(&ticker)
    }

    fn begin_history(&self, raw_ticker: &str) -> Option<(u64, String)> {
        let Some(ticker) = normalize_ticker(raw_ticker) else {
            self.logger.warn("Ignoring history request for an empty ticker");
            return None;
        };

        let mut inner = lock_state(&self.inner);
        inner.last_session += 1;
        let id = inner.last_session;
        inner.session = Session::new(id, ticker.clone());

        let session = &mut inner.session;
        if let Err(e) = session.tracker.apply(DetailEvent::HistoryRequested) {
            self.logger.error(&e.to_string());
            return None;
        }
        session.history.begin_loading();

        self.logger.debug(&format!("Fetching history for {} (session #{})", ticker, id));
        Some((id, ticker))
    }

    fn begin_manual_analysis(&self, raw_ticker: &str) -> Option<AnalysisTicket> {
        let ticker = normalize_ticker(raw_ticker)?;
        let mut inner = lock_state(&self.inner);
        let session = &mut inner.session;

        if session.ticker != ticker {
            self.logger.warn(&format!(
                "Ignoring analysis request for {}: showing {}",
                ticker, session.ticker
            ));
            return None;
        }

        if !session.tracker.accepts(DetailEvent::AnalysisRequested) {
            let phase = session.tracker.current();
            self.logger.warn(&format!(
                "Analysis request for {} rejected in {} (accepts {:?})",
                ticker,
                phase,
                DetailTransitions::accepted_events(phase)
            ));
            return None;
        }

        match session.begin_analysis() {
            Ok(ticket) => {
                self.logger.info(&format!("Analysis requested for {}", ticker));
                Some(ticket)
            }
            Err(e) => {
                self.logger.error(&e.to_string());
                None
            }
        }
    }

    /// Apply a history response; returns the chained analysis request, if any
    fn complete_history(
        inner: &Mutex<DetailInner>,
        logger: &Logger,
        session_id: u64,
        result: FetchResult<StockHistory>,
    ) -> Option<AnalysisTicket> {
        let mut inner = lock_state(inner);
        let current = inner.session.id;
        let session = &mut inner.session;

        if current != session_id {
            log_stale_response(logger.context(), "history", session_id, current);
            return None;
        }

        match result {
            Ok(history) => {
                logger.info(&format!(
                    "Loaded {} history points for {} ({})",
                    history.points.len(),
                    session.ticker,
                    history.company_name
                ));
                session.company_name = history.company_name;
                session.history.succeed(history.points);
                if let Err(e) = session.tracker.apply(DetailEvent::HistoryLoaded) {
                    logger.error(&e.to_string());
                    return None;
                }
            }
            Err(e) => {
                logger.warn_with_error(&format!("Failed to fetch history for {}", session.ticker), &e);
                session.history.fail(HISTORY_LOAD_FAILED);
                if let Err(e) = session.tracker.apply(DetailEvent::HistoryRejected) {
                    logger.error(&e.to_string());
                }
                return None;
            }
        }

        match session.tracker.pending_follow_up() {
            Some(DetailEvent::AnalysisRequested) => match session.begin_analysis() {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    logger.error(&e.to_string());
                    None
                }
            },
            Some(other) => {
                logger.warn(&format!("Unhandled follow-up event {}", other));
                None
            }
            None => None,
        }
    }

    fn complete_analysis(
        inner: &Mutex<DetailInner>,
        logger: &Logger,
        ticket: &AnalysisTicket,
        result: FetchResult<StockAnalysis>,
    ) {
        let mut inner = lock_state(inner);
        let session = &mut inner.session;

        if session.id != ticket.session {
            log_stale_response(logger.context(), "analysis", ticket.session, session.id);
            return;
        }
        if session.analysis_generation != ticket.generation {
            log_stale_response(logger.context(), "analysis", ticket.generation, session.analysis_generation);
            return;
        }

        let event = match result {
            Ok(analysis) => {
                logger.info(&format!(
                    "Analysis ready for {}: trend={} risk={}",
                    ticket.ticker, analysis.analysis.trend, analysis.analysis.risk_level
                ));
                session.analysis.succeed(analysis);
                DetailEvent::AnalysisLoaded
            }
            Err(e) => {
                logger.warn_with_error(&format!("Failed to analyse {}", ticket.ticker), &e);
                session.analysis.fail(ANALYSIS_FAILED);
                DetailEvent::AnalysisRejected
            }
        };

        if let Err(e) = session.tracker.apply(event) {
            logger.error(&e.to_string());
        }
    }
}

async fn run_analysis(
    source: Arc<dyn StockDataSource>,
    inner: Arc<Mutex<DetailInner>>,
    logger: Logger,
    ticket: AnalysisTicket,
) {
    let result = source.analyze(&ticket.ticker).await;
    DetailOrchestrator::complete_analysis(&inner, &logger, &ticket, result);
}
