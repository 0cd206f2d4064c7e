//! Pricing Engine
//!
//! Pure price computation for orders — no I/O, no side effects. The order
//! orchestrator feeds it snapshotted items plus the department's pricing
//! settings and gets back a [`PriceBreakdown`].

mod calculator;

pub use calculator::{PriceBreakdown, calculate, calculate_subtotal};
