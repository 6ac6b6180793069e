mod classify;
pub use classify::{
    CatalogSummary, Classification, ClassifiedProduct, ClassifyError, Classifier, classify,
};

mod date;
pub use date::{ISO_DATE, days_remaining, parse_date};

mod product;
pub use product::{Perishable, ProductData, ProductRecord, RawProductData};

mod urgency;
pub use urgency::{BucketCounts, Thresholds, Urgency};

use thiserror::Error;

/// An error type for input that cannot be turned into a well-formed model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The text is not a calendar date of the form `YYYY-MM-DD`
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Date(String),
    /// The urgency thresholds do not describe a non-overlapping partition
    #[error("invalid thresholds: {0}")]
    Thresholds(&'static str),
}
