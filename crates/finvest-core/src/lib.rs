//! # finvest-core
//!
//! Domain layer for the FinVest portfolio dashboard: asset records, the
//! in-memory asset store, portfolio aggregation, and the application state
//! container driving the views.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      AppSession                           │
//! │  ┌────────────┐  ┌─────────────┐  ┌───────────────────┐  │
//! │  │ AssetStore │──│  Aggregator │──│  ViewState/flags  │  │
//! │  │ (add/rm)   │  │  (summary,  │  │  (discrete        │  │
//! │  │            │  │ allocation) │  │   transitions)    │  │
//! │  └────────────┘  └─────────────┘  └───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Summary and allocation are derived on every read. Nothing here performs
//! I/O; all state lives in process memory.

pub mod app;
pub mod error;
pub mod model;
pub mod store;
pub mod summary;

pub use app::{AppSession, ViewState};
pub use error::{CoreError, Result};
pub use model::{AllocationEntry, Asset, AssetType, PortfolioSummary};
pub use store::AssetStore;
pub use summary::{allocations, summarize};
