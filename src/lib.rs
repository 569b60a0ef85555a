// Resale Price Estimation Engine - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod dataset;
pub mod engine;
pub mod estimator;
pub mod filter;
pub mod floors;
pub mod record;

// Re-export commonly used types
pub use dataset::{DataError, Dataset, REQUIRED_COLUMNS};
pub use engine::{estimate, Estimation, Query};
pub use estimator::{
    compute_psf, format_thousands, prepare_candidates, price_range_text, summarize_for_band,
    FloorBandSummary, PricedCandidate, RecentTransaction, PRICE_BAND_SGD,
    RECENT_TRANSACTION_LIMIT, SQM_PER_SQFT,
};
pub use filter::select_candidates;
pub use floors::{FloorBand, LOW_BAND_MAX_FLOOR, MID_BAND_MAX_FLOOR};
pub use record::{RawRecord, ResaleRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
