use crate::models::{ProductData, ProductRecord};
use std::future::Future;

/// Repository interface for the product catalog.
///
/// This trait encapsulates persistence of the single entity the tracker deals
/// with. It stores products verbatim; classification happens on read, never
/// at rest.
pub trait CatalogRepository: super::Repository {
    /// Store a new product under `product_id`.
    fn create_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> impl Future<Output = Result<ProductRecord<Self::ProductId, ProductData>, Self::Error>> + Send;

    /// Retrieve every product, ordered by expiration date ascending.
    ///
    /// Products sharing an expiration date come back in the order they were
    /// created.
    fn list_products(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductRecord<Self::ProductId, ProductData>>, Self::Error>>
    + Send;

    /// Retrieve a single product.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) if the product exists
    /// - Ok(None) if no such product exists
    /// - Err otherwise
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error>>
    + Send;

    /// Replace the data of an existing product. The id does not change.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the updated record if successful
    /// - Ok(None) if no such product exists
    /// - Err otherwise
    fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error>>
    + Send;

    /// Remove a product from the catalog.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the record as it was before deletion
    /// - Ok(None) if no such product exists
    /// - Err otherwise
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error>>
    + Send;
}
