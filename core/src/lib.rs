//! # realticker-core - view-state orchestration for ranked equity data
//!
//! Two independent controllers sit between a presentation layer and the
//! stock-data service:
//! - [`ListOrchestrator`](orchestrators::ListOrchestrator): sort selection and
//!   the top-10 ranking fetched for it
//! - [`DetailOrchestrator`](orchestrators::DetailOrchestrator): price history
//!   for one ticker, chained into an on-demand analysis
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use realticker_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8000")?;
//!     let list = ListOrchestrator::new(&config)?;
//!
//!     list.set_sort_key(SortKey::Volume).await;
//!     for (rank, stock) in list.snapshot().ranked() {
//!         println!("#{} {}", rank, stock.ticker);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrators;
pub mod services;
pub mod state_machine;
pub mod utils;

// Prelude for convenient imports
pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::config::ClientConfig;
    pub use crate::error::{FetchError, FetchResult};
    pub use crate::models::{
        AnalysisResult, HistoryPoint, Phase, RequestState, SortKey, StockAnalysis, StockHistory,
        StockSummary,
    };
    pub use crate::orchestrators::{DetailOrchestrator, DetailView, ListOrchestrator, ListView};
    pub use crate::services::{HttpStockService, StockDataSource};
    pub use crate::state_machine::DetailPhase;
}
