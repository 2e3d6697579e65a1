//! `tally-recon` — two-source transaction reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns classified
//! results. No CLI dependencies.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod normalize;
pub mod report;
pub mod session;
pub mod summary;

pub use compare::{AmountCompare, ComparePolicy, StatusCompare};
pub use config::ReconConfig;
pub use engine::reconcile;
pub use error::{ReconError, Side};
pub use index::{DuplicatePolicy, KeyedIndex};
pub use model::{Comparison, MatchedPair, ReconReport, TxRecord};
pub use session::ReconSession;
