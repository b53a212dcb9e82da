//! Shopping cart module.
//!
//! Contains the in-memory cart collection and its line items.

mod cart;
mod line;

pub use cart::Cart;
pub use line::{CartLine, ProductSnapshot};
