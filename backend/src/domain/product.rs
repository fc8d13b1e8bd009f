//! Product entity and creation payload.

use chrono::{DateTime, Utc};

/// Validation failures for [`NewProduct`].
///
/// The display text is the client-facing description written by the HTTP
/// adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// Name is empty or price is zero.
    #[error("Missing field")]
    MissingField,
    /// Price is negative.
    #[error("Invalid price")]
    InvalidPrice,
}

/// A persisted product row.
///
/// Timestamps are owned by the persistence layer; `deleted_at` is part of the
/// schema but deletion removes the row outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Flake id minted at creation.
    pub id: i64,
    pub name: String,
    /// Price in minor units.
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Always `None` for stored rows.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Validated input for product creation.
///
/// ## Invariants
/// - `name` is non-empty.
/// - `price` is strictly positive.
///
/// # Examples
/// ```
/// use product_backend::domain::{NewProduct, ProductValidationError};
///
/// let product = NewProduct::new("lamp", 1200).expect("valid product");
/// assert_eq!(product.price(), 1200);
///
/// assert_eq!(NewProduct::new("lamp", 0), Err(ProductValidationError::MissingField));
/// assert_eq!(NewProduct::new("lamp", -5), Err(ProductValidationError::InvalidPrice));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    price: i64,
}

impl NewProduct {
    /// Validate a name and price pair.
    ///
    /// A zero price counts as missing rather than invalid, and the missing
    /// check runs before the sign check.
    pub fn new(name: impl Into<String>, price: i64) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.is_empty() || price == 0 {
            return Err(ProductValidationError::MissingField);
        }
        if price < 0 {
            return Err(ProductValidationError::InvalidPrice);
        }
        Ok(Self { name, price })
    }

    /// Product name, never empty.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Price, always positive.
    pub fn price(&self) -> i64 {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 1, ProductValidationError::MissingField)]
    #[case("test", 0, ProductValidationError::MissingField)]
    #[case("", 0, ProductValidationError::MissingField)]
    #[case("", -1, ProductValidationError::MissingField)]
    #[case("test", -1, ProductValidationError::InvalidPrice)]
    #[case("test", i64::MIN, ProductValidationError::InvalidPrice)]
    fn rejects_invalid_input(
        #[case] name: &str,
        #[case] price: i64,
        #[case] expected: ProductValidationError,
    ) {
        assert_eq!(NewProduct::new(name, price), Err(expected));
    }

    #[rstest]
    fn accepts_positive_price_and_name() {
        let product = NewProduct::new("test", 1).expect("valid product");
        assert_eq!(product.name(), "test");
        assert_eq!(product.price(), 1);
    }

    #[rstest]
    fn validation_messages_match_client_descriptions() {
        assert_eq!(ProductValidationError::MissingField.to_string(), "Missing field");
        assert_eq!(ProductValidationError::InvalidPrice.to_string(), "Invalid price");
    }
}
