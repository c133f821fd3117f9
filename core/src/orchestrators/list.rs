use crate::{
    config::ClientConfig,
    error::{FetchResult, LIST_LOAD_FAILED},
    models::{RequestState, SortKey, StockSummary},
    services::{HttpStockService, StockDataSource},
    utils::{lock_state, log_stale_response, Logger},
};
use serde::Serialize;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Read-only copy of the list view state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub sort_key: SortKey,
    pub list: RequestState<Vec<StockSummary>>,
}

impl ListView {
    /// Entries in service order with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &StockSummary)> + '_ {
        self.list
            .data()
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(index, stock)| (index + 1, stock))
    }
}

struct ListInner {
    sort_key: SortKey,
    list: RequestState<Vec<StockSummary>>,
    /// Bumped on every request; only the latest one may write `list`
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct ListTicket {
    generation: u64,
    sort_key: SortKey,
}

/// Owns the sort selection and the top-10 list fetched for it
#[derive(Clone)]
pub struct ListOrchestrator {
    source: Arc<dyn StockDataSource>,
    inner: Arc<Mutex<ListInner>>,
    logger: Logger,
}

impl ListOrchestrator {
    pub fn new(config: &ClientConfig) -> FetchResult<Self> {
        Ok(Self::with_source(Arc::new(HttpStockService::new(config)?)))
    }

    pub fn with_source(source: Arc<dyn StockDataSource>) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(ListInner {
                sort_key: SortKey::default(),
                list: RequestState::idle(),
                generation: 0,
            })),
            logger: Logger::new("LIST"),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        lock_state(&self.inner).sort_key
    }

    pub fn snapshot(&self) -> ListView {
        let inner = lock_state(&self.inner);
        ListView {
            sort_key: inner.sort_key,
            list: inner.list.clone(),
        }
    }

    /// Select a new sort key and fetch its ranking.
    ///
    /// Any fetch still in flight is superseded: its response will be dropped.
    pub fn set_sort_key(&self, key: SortKey) -> impl Future<Output = ()> + Send + 'static {
        let previous = self.sort_key();
        if previous != key {
            self.logger.info(&format!("Sort key changed: {} → {}", previous, key));
        }
        self.fetch_top(key)
    }

    /// Fetch the top-10 ranking for `key`.
    ///
    /// The list is marked loading before this returns; the returned future
    /// performs the request and applies the response if it is still the latest.
    pub fn fetch_top(&self, key: SortKey) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin(key);
        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        let logger = self.logger.clone();

        async move {
            let result = source.top10(ticket.sort_key).await;
            Self::complete(&inner, &logger, ticket, result);
        }
    }

    /// Re-fetch with the current selection
    pub fn retry(&self) -> impl Future<Output = ()> + Send + 'static {
        let key = self.sort_key();
        self.logger.info(&format!("Retrying top stocks for {}", key));
        self.fetch_top(key)
    }

    fn begin(&self, key: SortKey) -> ListTicket {
        let mut inner = lock_state(&self.inner);
        inner.generation += 1;
        inner.sort_key = key;
        inner.list.begin_loading();

        self.logger.debug(&format!(
            "Fetching top stocks by {} (request #{})",
            key, inner.generation
        ));

        ListTicket {
            generation: inner.generation,
            sort_key: key,
        }
    }

    fn complete(
        inner: &Mutex<ListInner>,
        logger: &Logger,
        ticket: ListTicket,
        result: FetchResult<Vec<StockSummary>>,
    ) {
        let mut inner = lock_state(inner);

        if inner.generation != ticket.generation {
            log_stale_response(logger.context(), ticket.sort_key.as_str(), ticket.generation, inner.generation);
            return;
        }

        match result {
            Ok(stocks) => {
                logger.info(&format!("Loaded {} stocks sorted by {}", stocks.len(), ticket.sort_key));
                inner.list.succeed(stocks);
            }
            Err(e) => {
                logger.warn_with_error(&format!("Failed to fetch top stocks by {}", ticket.sort_key), &e);
                inner.list.fail(LIST_LOAD_FAILED);
            }
        }
    }
}
