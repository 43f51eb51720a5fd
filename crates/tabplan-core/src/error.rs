//! Error types for plan documents supplied by callers.
//!
//! The text pipeline itself never fails; these errors only arise when
//! decoding a caller's document or period name.

use thiserror::Error;

use crate::schema::Period;

#[derive(Debug, Error)]
pub enum PlanDocumentError {
    #[error("unknown plan period {0:?} (expected daily, weekly, monthly, or yearly)")]
    UnknownPeriod(String),

    #[error("invalid {period} plan document: {source}")]
    InvalidDocument {
        period: Period,
        #[source]
        source: serde_json::Error,
    },
}
