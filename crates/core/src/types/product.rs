//! Product domain types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price;

/// A sellable catalog product.
///
/// Owned by the catalog store; created, updated, and deleted only through
/// its API. The `price` field is the verbatim display string the catalog
/// data ships with (see [`price::parse_amount`]); it is persisted unchanged.
///
/// Serialized field names match the persisted record (`imageRef` etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Genre label (e.g., "Adventure").
    pub genre: String,
    /// Display price string, stored verbatim (e.g., `"$1.599,99"`).
    pub price: String,
    /// Rating in `[0.0, 5.0]`.
    pub rating: f32,
    /// Long-form description.
    pub description: String,
    /// Opaque handle to the product image; the engine never interprets it.
    pub image_ref: String,
    /// Purchasable units remaining.
    pub stock: u32,
}

impl Product {
    /// Numeric amount of the display price.
    ///
    /// Lenient: malformed prices are `0.0` (see [`price::parse_amount`]).
    #[must_use]
    pub fn price_amount(&self) -> f64 {
        price::parse_amount(&self.price)
    }
}

/// A product as submitted for creation, before the catalog assigns an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display title.
    pub title: String,
    /// Genre label.
    pub genre: String,
    /// Display price string (e.g., `"$49.990"`).
    pub price: String,
    /// Rating in `[0.0, 5.0]`.
    pub rating: f32,
    /// Long-form description.
    pub description: String,
    /// Opaque handle to the product image.
    pub image_ref: String,
    /// Initial stock count.
    pub stock: u32,
}

impl NewProduct {
    /// Attach the catalog-assigned ID, producing a full [`Product`].
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            genre: self.genre,
            price: self.price,
            rating: self.rating,
            description: self.description,
            image_ref: self.image_ref,
            stock: self.stock,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Starlight Drifter".to_string(),
            genre: "Adventure".to_string(),
            price: "$49.990".to_string(),
            rating: 4.5,
            description: "Open-world sailing adventure.".to_string(),
            image_ref: "assets/starlight_drifter.png".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn test_price_amount() {
        assert_eq!(sample().price_amount(), 49_990.0);
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        // Persisted records use camelCase, price verbatim
        assert_eq!(json["imageRef"], "assets/starlight_drifter.png");
        assert_eq!(json["price"], "$49.990");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn test_with_id() {
        let new = NewProduct {
            title: "t".to_string(),
            genre: "g".to_string(),
            price: "$1,00".to_string(),
            rating: 3.0,
            description: "d".to_string(),
            image_ref: "i".to_string(),
            stock: 2,
        };
        let product = new.with_id(ProductId::new(7));
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.stock, 2);
    }
}
