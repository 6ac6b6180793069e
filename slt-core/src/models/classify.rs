use super::{
    BucketCounts, Perishable, ProductData, ProductRecord, Thresholds, Urgency, ValidationError,
};
use std::convert::Infallible;
use thiserror::Error;
use time::Date;

/// A product together with where it stands relative to a reference date.
///
/// This is derived on every read and never persisted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedProduct<ProductId, ProductData> {
    /// The product as supplied to the classifier
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub record: ProductRecord<ProductId, ProductData>,
    /// Whole days from the reference date to the expiration date; negative once expired
    pub days_remaining: i64,
    /// The urgency bucket for `days_remaining`
    pub urgency: Urgency,
    /// The warning raised for this product, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub warning: Option<String>,
}

/// Catalog-wide aggregates of a classification.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSummary {
    /// Number of products per urgency bucket
    pub counts: BucketCounts,
    /// Warning messages, in catalog order
    pub warnings: Vec<String>,
}

/// The result of classifying a catalog snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification<ProductId, ProductData> {
    /// One entry per input product, in input order
    pub products: Vec<ClassifiedProduct<ProductId, ProductData>>,
    /// Bucket counts and warnings
    pub summary: CatalogSummary,
}

impl<ProductId, ProductData> Classification<ProductId, ProductData> {
    /// Split into the classified sequence and the summary.
    pub fn into_parts(self) -> (Vec<ClassifiedProduct<ProductId, ProductData>>, CatalogSummary) {
        (self.products, self.summary)
    }
}

/// The ways in which classification may fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// A product's expiration date could not be determined
    #[error("invalid input for product {code:?}: {source}")]
    InvalidInput {
        /// The code of the offending product
        code: String,
        /// What was wrong with it
        #[source]
        source: ValidationError,
    },
}

/// Buckets products by how soon they expire and raises warnings for the ones
/// that need attention.
///
/// The classifier holds no state besides its thresholds: the same catalog and
/// reference date always produce the same classification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    /// Create a classifier, rejecting thresholds that do not partition the timeline.
    pub fn new(thresholds: Thresholds) -> Result<Self, ValidationError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Bucket a remaining-day count.
    pub fn urgency(&self, days_remaining: i64) -> Urgency {
        self.thresholds.urgency(days_remaining)
    }

    /// The warning for a product with `days_remaining` days left, if one is due.
    ///
    /// This is independent of the urgency bucket: a `WARNING` product with 120
    /// days left raises nothing, while every expired product does.
    pub fn warning(&self, product: &impl Perishable, days_remaining: i64) -> Option<String> {
        if days_remaining < 0 {
            Some(format!(
                "Product {} (code: {}) is expired!",
                product.description(),
                product.code()
            ))
        } else if days_remaining <= self.thresholds.alert_within_days {
            Some(format!(
                "Product {} (code: {}) expires in {} days!",
                product.description(),
                product.code(),
                days_remaining
            ))
        } else {
            None
        }
    }

    /// Classify a catalog snapshot relative to `reference_date`.
    ///
    /// Output order follows input order. If any product lacks a valid
    /// expiration date the whole call fails and nothing is returned.
    pub fn classify<ProductId, ProductData, I>(
        &self,
        products: I,
        reference_date: Date,
    ) -> Result<Classification<ProductId, ProductData>, ClassifyError>
    where
        ProductData: Perishable,
        I: IntoIterator<Item = ProductRecord<ProductId, ProductData>>,
    {
        self.classify_with(products, reference_date, |record| {
            record
                .expiration_date()
                .map_err(|source| ClassifyError::InvalidInput {
                    code: record.code().to_owned(),
                    source,
                })
        })
    }

    /// Classify typed product records, which always carry a calendar date.
    ///
    /// Same output as [`Classifier::classify`], without the failure case.
    pub fn classify_catalog<ProductId, I>(
        &self,
        products: I,
        reference_date: Date,
    ) -> Classification<ProductId, ProductData>
    where
        I: IntoIterator<Item = ProductRecord<ProductId, ProductData>>,
    {
        let classified = self.classify_with(products, reference_date, |record| {
            Ok::<_, Infallible>(record.data.expiration_date)
        });
        match classified {
            Ok(classification) => classification,
            Err(never) => match never {},
        }
    }

    fn classify_with<ProductId, P, I, E>(
        &self,
        products: I,
        reference_date: Date,
        expiration_date: impl Fn(&ProductRecord<ProductId, P>) -> Result<Date, E>,
    ) -> Result<Classification<ProductId, P>, E>
    where
        P: Perishable,
        I: IntoIterator<Item = ProductRecord<ProductId, P>>,
    {
        let products = products.into_iter();
        let mut classified = Vec::with_capacity(products.size_hint().0);
        let mut summary = CatalogSummary::default();

        for record in products {
            let days_remaining = super::days_remaining(expiration_date(&record)?, reference_date);
            let urgency = self.urgency(days_remaining);
            let warning = self.warning(&record, days_remaining);

            summary.counts.record(urgency);
            if let Some(message) = &warning {
                summary.warnings.push(message.clone());
            }

            classified.push(ClassifiedProduct {
                record,
                days_remaining,
                urgency,
                warning,
            });
        }

        Ok(Classification {
            products: classified,
            summary,
        })
    }
}

/// Classify a catalog snapshot with the default thresholds.
pub fn classify<ProductId, ProductData, I>(
    products: I,
    reference_date: Date,
) -> Result<Classification<ProductId, ProductData>, ClassifyError>
where
    ProductData: Perishable,
    I: IntoIterator<Item = ProductRecord<ProductId, ProductData>>,
{
    Classifier::default().classify(products, reference_date)
}
