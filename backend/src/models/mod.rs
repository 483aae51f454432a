//! Domain models shared across the backend.

pub mod analysis;
pub mod coin;

pub use analysis::AnalysisRecord;
pub use coin::Coin;
