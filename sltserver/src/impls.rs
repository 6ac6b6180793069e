//! The concrete application served by this binary.

use slt_core::{
    models::{Classifier, ProductData},
    ports::Application,
};
use slt_sqlite::{Db, types::ProductId};
use time::{Date, OffsetDateTime, UtcOffset};

/// The catalog store, the classification rules and the local calendar.
#[derive(Clone)]
pub struct SltApp {
    /// The catalog store
    pub db: Db,
    /// Classifies products with the configured thresholds
    pub classifier: Classifier,
    /// The offset that defines "today"; read once at startup
    pub offset: UtcOffset,
}

impl Application for SltApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        ProductId::generate()
    }
}
