//! Payment preference request built from the cart lines.

use crate::cart::CartLine;
use crate::ids::ProductId;
use crate::money::Money;
use crate::CartError;
use serde::Serialize;
use std::collections::HashSet;

/// One item of a payment preference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentItem {
    pub title: String,
    pub price: Money,
    pub quantity: u32,
    /// Absolute URL of the first product image, or empty.
    pub picture_url: String,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

/// Body posted to the payment preference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub items: Vec<PaymentItem>,
}

impl PaymentRequest {
    /// Build a request from the current lines.
    ///
    /// Relative image references are resolved against `asset_base_url`.
    /// Fails if there are no lines, or if the lines span more than one
    /// seller: the provider settles each transaction with a single seller.
    pub fn from_lines(lines: &[CartLine], asset_base_url: &str) -> Result<Self, CartError> {
        if lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let sellers: HashSet<_> = lines.iter().map(|l| l.seller_id.as_ref()).collect();
        if sellers.len() > 1 {
            return Err(CartError::MultipleSellers {
                count: sellers.len(),
            });
        }

        let items = lines
            .iter()
            .map(|line| PaymentItem {
                title: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                picture_url: line
                    .cover_image()
                    .map(|image| resolve_asset(asset_base_url, image))
                    .unwrap_or_default(),
                product_id: line.product_id.clone(),
            })
            .collect();

        Ok(Self { items })
    }

    /// Sum of price times quantity across the items.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.price.times(i.quantity)).sum()
    }
}

fn resolve_asset(base: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") || base.is_empty() {
        return image.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}
