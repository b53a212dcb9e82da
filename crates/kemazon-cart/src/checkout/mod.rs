//! Checkout hand-off.
//!
//! The cart's job ends at building the payment request from its lines and,
//! once the payment provider reports back, clearing itself if the payment
//! was approved.

mod request;
mod settle;

pub use request::{PaymentItem, PaymentRequest};
pub use settle::{settle, PaymentStatus};
