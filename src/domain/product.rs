use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A grocery product as stored by the remote service.
///
/// The `id` is assigned by the server on creation and never changes
/// afterwards. `qty` is unsigned, so a negative stock count is
/// unrepresentable; operations that would drive it below zero must be
/// rejected before they reach the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub qty: u32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        qty: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            qty,
        }
    }
}

/// Payload for creating a new product. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub qty: u32,
}

/// Raw creation form input, exactly as the user typed it.
///
/// `validate` turns it into a [`NewProduct`] or reports the first
/// problem it finds: empty field, non-numeric price/qty, or a negative
/// value.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub qty: String,
}

impl ProductForm {
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }

        let price = parse_price(&self.price)?;
        let qty = parse_qty(&self.qty)?;

        Ok(NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
            qty,
        })
    }
}

fn parse_price(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("price"));
    }
    let price: f64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field: "price",
        value: trimmed.to_string(),
    })?;
    if !price.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "price",
            value: trimmed.to_string(),
        });
    }
    if price < 0.0 {
        return Err(ValidationError::NegativeValue {
            field: "price",
            value: trimmed.to_string(),
        });
    }
    Ok(price)
}

fn parse_qty(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("qty"));
    }
    match trimmed.parse::<u32>() {
        Ok(qty) => Ok(qty),
        // Distinguish "negative" from "not a number" for the notice text.
        Err(_) => match trimmed.parse::<i64>() {
            Ok(value) if value < 0 => Err(ValidationError::NegativeValue {
                field: "qty",
                value: trimmed.to_string(),
            }),
            _ => Err(ValidationError::NotANumber {
                field: "qty",
                value: trimmed.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, price: &str, qty: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            qty: qty.to_string(),
        }
    }

    #[test]
    fn valid_form_parses_and_trims() {
        let draft = form(" Milk ", "1L full cream", " 60.5 ", " 10 ")
            .validate()
            .unwrap();
        assert_eq!(draft.name, "Milk");
        assert_eq!(draft.description, "1L full cream");
        assert_eq!(draft.price, 60.5);
        assert_eq!(draft.qty, 10);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let err = form("  ", "desc", "1", "1").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("name"));

        let err = form("Milk", "", "1", "1").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("description"));

        let err = form("Milk", "desc", "", "1").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("price"));

        let err = form("Milk", "desc", "1", "  ").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("qty"));
    }

    #[test]
    fn non_numeric_price_and_qty_are_rejected() {
        assert!(matches!(
            form("Milk", "desc", "cheap", "1").validate(),
            Err(ValidationError::NotANumber { field: "price", .. })
        ));
        assert!(matches!(
            form("Milk", "desc", "1", "lots").validate(),
            Err(ValidationError::NotANumber { field: "qty", .. })
        ));
        assert!(matches!(
            form("Milk", "desc", "NaN", "1").validate(),
            Err(ValidationError::NotANumber { field: "price", .. })
        ));
    }

    #[test]
    fn negative_price_and_qty_are_rejected() {
        assert!(matches!(
            form("Milk", "desc", "-4", "1").validate(),
            Err(ValidationError::NegativeValue { field: "price", .. })
        ));
        assert!(matches!(
            form("Milk", "desc", "1", "-3").validate(),
            Err(ValidationError::NegativeValue { field: "qty", .. })
        ));
    }

    #[test]
    fn zero_price_and_qty_are_allowed() {
        let draft = form("Milk", "desc", "0", "0").validate().unwrap();
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.qty, 0);
    }
}
