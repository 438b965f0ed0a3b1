//! The shopping cart a single order accumulates into

use crate::error::Result;
use crate::order::{CartLine, DiscountPolicy, OrderTotals};

/// Ordered cart lines for one order
///
/// Lines keep insertion order. Adding the same product twice yields two
/// separate lines; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validated line
    pub fn add_line(&mut self, line: CartLine) -> Result<()> {
        line.validate()?;
        log::debug!(
            "Cart line added: {} x {} = {}",
            line.product_name,
            line.quantity,
            line.line_total()
        );
        self.lines.push(line);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line total
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn totals(&self, policy: &DiscountPolicy) -> OrderTotals {
        policy.apply(self.subtotal())
    }
}
