mod catalog;
pub use catalog::CatalogRepository;

use crate::models::{Classification, Classifier, ProductData};
use std::future::Future;
use time::Date;

/// Base trait for all repositories, defining the shared associated types.
pub trait Repository {
    /// The error type for underlying repository operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier assigned to each product; immutable once assigned
    type ProductId: Clone + Eq + Send + Sync + 'static;
}

/// A classified catalog report, keyed by the repository's product ids.
pub type Report<T> =
    Classification<<<T as Application>::Repository as Repository>::ProductId, ProductData>;

/// The top-level trait an application implements to tie a catalog store to
/// the classification rules and the deployment's notion of "today".
pub trait Application {
    /// The catalog store
    type Repository: CatalogRepository;

    /// Get the catalog store
    fn database(&self) -> &Self::Repository;

    /// Get the classifier (and therefore the urgency thresholds) in use
    fn classifier(&self) -> &Classifier;

    /// The current date in the deployment's local calendar
    fn today(&self) -> Date;

    /// Generate a fresh id for a product about to be created
    fn generate_product_id(
        &self,
        data: &ProductData,
    ) -> <Self::Repository as Repository>::ProductId;

    /// Read the whole catalog and classify it relative to `reference_date`.
    ///
    /// The catalog arrives ordered by expiration date and the report keeps
    /// that order. Stored products always carry a calendar date, so only
    /// reading the catalog can fail.
    fn report(
        &self,
        reference_date: Date,
    ) -> impl Future<Output = Result<Report<Self>, <Self::Repository as Repository>::Error>> + Send
    where
        Self: Sync + Sized,
    {
        async move {
            let products = self.database().list_products().await?;
            Ok(self
                .classifier()
                .classify_catalog(products, reference_date))
        }
    }
}
