use slt_core::{
    models::{Classifier, ProductData},
    ports::Application,
};
use slt_sqlite::{Db, types::ProductId};
use time::Date;

/// An application with a pinned "today", so classifications are reproducible.
#[derive(Clone)]
pub struct TestApp {
    pub db: Db,
    pub classifier: Classifier,
    pub today: Date,
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn today(&self) -> Date {
        self.today
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        ProductId::generate()
    }
}
