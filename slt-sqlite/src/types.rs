//! Type definitions for the SQLite implementation.
//!
//! The public [`ProductId`] is the identifier every catalog record carries;
//! the crate-private row type maps the `product` table onto `slt-core` models.

use slt_core::models::{ProductData, ProductRecord};

mod ids;
pub use ids::ProductId;

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub code: String,
    pub description: String,
    pub quantity: u32,
    pub lot: Option<String>,
    pub expiration_date: time::Date,
    pub photo_reference: Option<String>,
}

impl From<ProductRow> for ProductRecord<ProductId, ProductData> {
    fn from(row: ProductRow) -> Self {
        ProductRecord {
            id: row.id,
            data: ProductData {
                code: row.code,
                description: row.description,
                quantity: row.quantity,
                lot: row.lot,
                expiration_date: row.expiration_date,
                photo_reference: row.photo_reference,
            },
        }
    }
}
