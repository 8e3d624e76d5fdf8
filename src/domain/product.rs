//! Product domain model.
//!
//! A [`Product`] is a catalog record that exists on the inventory service and
//! carries a server-assigned `id`. A [`ProductDraft`] is the editable payload
//! without identity: the buffer the operator types into and the body sent on
//! create and update. Keeping them as separate types means an id can never leak
//! into a create body, and update/delete always carry their id out of band.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{InventoryError, Result};

/// A persisted catalog record as returned by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "price::deserialize")]
    pub price: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the identity-less payload of this record.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price,
            created_at: self.created_at,
        }
    }
}

/// The editable product payload shared by the search, create and update flows.
///
/// Every field always holds a value: a fresh draft has empty text, a zero
/// price and the current time as its creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub code: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            created_at: Utc::now(),
        }
    }
}

impl ProductDraft {
    /// Checks the draft before a create or update request is sent.
    ///
    /// All four text fields must be non-empty and the price finite and
    /// strictly positive. `NaN` (left behind by non-numeric input) and
    /// `inf` (which `f64` parsing accepts) both fail.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] when any rule is violated.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom::domain::ProductDraft;
    ///
    /// let mut draft = ProductDraft::default();
    /// assert!(draft.validate().is_err());
    ///
    /// draft.name = "Bat".into();
    /// draft.code = "B1".into();
    /// draft.description = "d".into();
    /// draft.category = "c".into();
    /// draft.price = 10.0;
    /// assert!(draft.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let text_complete = [&self.name, &self.code, &self.description, &self.category]
            .iter()
            .all(|value| !value.is_empty());

        if text_complete && self.price.is_finite() && self.price > 0.0 {
            Ok(())
        } else {
            Err(InventoryError::incomplete_draft())
        }
    }

    /// Returns the current value of a text field, or `None` for the price.
    #[must_use]
    pub fn text(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::Name => Some(&self.name),
            DraftField::Code => Some(&self.code),
            DraftField::Description => Some(&self.description),
            DraftField::Category => Some(&self.category),
            DraftField::Price => None,
        }
    }
}

/// One editable field of a [`ProductDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Code,
    Description,
    Category,
    Price,
}

impl DraftField {
    /// Form label for the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Code => "Code",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Price => "Price",
        }
    }

    /// Placeholder shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter Product Name",
            Self::Code => "Enter Product Code",
            Self::Description => "Enter Product Description",
            Self::Category => "Enter Product Category",
            Self::Price => "Enter Product Price",
        }
    }
}

/// Formats a price for display and for seeding the price input.
///
/// Whole numbers print without a fractional part, mirroring how a numeric
/// input shows them.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        String::new()
    } else if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{price:.0}")
    } else {
        format!("{price}")
    }
}

/// Price decoding that tolerates decimal strings.
///
/// The inventory service stores prices as decimals, which some serializers
/// emit as JSON strings (`"10.00"`) rather than numbers.
mod price {
    use super::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid price {text:?}: {e}"))),
        }
    }
}

/// ISO-8601 timestamps with or without an offset.
///
/// Encodes as RFC 3339 with a `Z` suffix. Decodes RFC 3339, and naive
/// timestamps without an offset are read as UTC.
mod timestamp {
    use super::{DateTime, Deserialize, Deserializer, NaiveDateTime, SecondsFormat, Serializer, TimeZone, Utc};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}
