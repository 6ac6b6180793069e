use super::{ValidationError, parse_date};
use time::Date;

/// A product record combines a catalog identifier with the product's data.
///
/// The identifier is assigned by the catalog store and never changes; the data
/// may be replaced wholesale by an update.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductRecord<ProductId, ProductData> {
    /// Unique identifier for the product
    pub id: ProductId,
    /// The product itself
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ProductData,
}

/// A product held in stock.
///
/// The wire form is [`RawProductData`]; deserializing goes through it, so a
/// `ProductData` always carries a real calendar date.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawProductData", into = "RawProductData")
)]
pub struct ProductData {
    /// Short identifying code, not necessarily unique
    pub code: String,
    /// Display name
    pub description: String,
    /// Units on hand
    pub quantity: u32,
    /// Batch or lot identifier
    pub lot: Option<String>,
    /// The last day the product may be used
    pub expiration_date: Date,
    /// Reference to an externally stored photo
    pub photo_reference: Option<String>,
}

/// The untyped shape of a product, with the expiration date kept as text.
///
/// This is what arrives over the wire or out of a loosely typed row. It can be
/// classified directly (an unparsable date then fails the classification) or
/// converted into [`ProductData`] up front.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawProductData {
    /// Short identifying code, not necessarily unique
    pub code: String,
    /// Display name
    pub description: String,
    /// Units on hand
    pub quantity: u32,
    /// Batch or lot identifier
    #[cfg_attr(feature = "serde", serde(default))]
    pub lot: Option<String>,
    /// The last day the product may be used, as `YYYY-MM-DD`
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "super::date::date_schema")
    )]
    pub expiration_date: String,
    /// Reference to an externally stored photo
    #[cfg_attr(feature = "serde", serde(default))]
    pub photo_reference: Option<String>,
}

impl TryFrom<RawProductData> for ProductData {
    type Error = ValidationError;

    fn try_from(value: RawProductData) -> Result<Self, Self::Error> {
        let expiration_date = parse_date(&value.expiration_date)?;
        Ok(Self {
            code: value.code,
            description: value.description,
            quantity: value.quantity,
            lot: value.lot,
            expiration_date,
            photo_reference: value.photo_reference,
        })
    }
}

impl From<ProductData> for RawProductData {
    fn from(value: ProductData) -> Self {
        Self {
            code: value.code,
            description: value.description,
            quantity: value.quantity,
            lot: value.lot,
            expiration_date: value.expiration_date.to_string(),
            photo_reference: value.photo_reference,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for ProductData {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "ProductData".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        RawProductData::json_schema(generator)
    }
}

/// Anything the classifier can place on the expiration timeline.
pub trait Perishable {
    /// The product code quoted in warnings
    fn code(&self) -> &str;

    /// The display name quoted in warnings
    fn description(&self) -> &str;

    /// The expiration date, or the reason it cannot be determined
    fn expiration_date(&self) -> Result<Date, ValidationError>;
}

impl Perishable for ProductData {
    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn expiration_date(&self) -> Result<Date, ValidationError> {
        Ok(self.expiration_date)
    }
}

impl Perishable for RawProductData {
    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn expiration_date(&self) -> Result<Date, ValidationError> {
        parse_date(&self.expiration_date)
    }
}

impl<ProductId, T: Perishable> Perishable for ProductRecord<ProductId, T> {
    fn code(&self) -> &str {
        self.data.code()
    }

    fn description(&self) -> &str {
        self.data.description()
    }

    fn expiration_date(&self) -> Result<Date, ValidationError> {
        self.data.expiration_date()
    }
}
