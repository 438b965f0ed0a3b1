//! What gets sold: cart lines, customers, totals and finished invoices

use chrono::NaiveDateTime;

use crate::error::{Result, ValidationError};

/// Timestamp layout used for invoice identifiers and file names
pub const ID_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Timestamp layout printed on the invoice itself
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One product at one quantity, fixed once it lands in the cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    /// Checks the rules a line must satisfy before it joins a cart
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity(self.product_name.clone()).into());
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.product_name.clone()).into());
        }
        Ok(())
    }
}

/// Who the order ships to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// All three fields must hold something other than whitespace
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }
        Ok(())
    }
}

/// Subtotal, discount and what is left to pay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub payable: f64,
}

/// Threshold discount: spend at least `threshold`, get `rate` off the whole order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountPolicy {
    pub threshold: f64,
    pub rate: f64,
}

impl DiscountPolicy {
    pub const fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }

    pub fn discount_for(&self, subtotal: f64) -> f64 {
        if subtotal >= self.threshold {
            subtotal * self.rate
        } else {
            0.0
        }
    }

    pub fn apply(&self, subtotal: f64) -> OrderTotals {
        let discount = self.discount_for(subtotal);
        OrderTotals {
            subtotal,
            discount,
            payable: subtotal - discount,
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::new(500.0, 0.10)
    }
}

/// Identifier that names an invoice and its file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Second-resolution id; equal timestamps give equal ids
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        Self(timestamp.format(ID_TIMESTAMP_FORMAT).to_string())
    }

    /// Same timestamp id with a repeat counter appended
    pub fn with_sequence(timestamp: &NaiveDateTime, sequence: u32) -> Self {
        if sequence == 0 {
            return Self::from_timestamp(timestamp);
        }
        Self(format!(
            "{}_{}",
            timestamp.format(ID_TIMESTAMP_FORMAT),
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `invoice_<id>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("invoice_{}.{}", self.0, extension)
    }

    /// Recovers the id from a file name produced by [`InvoiceId::file_name`]
    pub fn from_file_name(name: &str, extension: &str) -> Option<Self> {
        let id = name
            .strip_prefix("invoice_")?
            .strip_suffix(extension)?
            .strip_suffix('.')?;
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed order, frozen at generation time
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer: Customer,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub generated_at: NaiveDateTime,
}

impl Invoice {
    pub fn display_timestamp(&self) -> String {
        self.generated_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DukkanError;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(CartLine::new("A", 250.0, 3).line_total(), 750.0);
        assert_eq!(CartLine::new("A", 250.0, 0).line_total(), 0.0);
        let bulk = CartLine::new("B", 999.5, u32::MAX).line_total();
        assert!(bulk.is_finite());
        assert_eq!(bulk, 999.5 * 4_294_967_295.0);
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let err = CartLine::new("A", 10.0, 0).validate().unwrap_err();
        assert!(matches!(
            err,
            DukkanError::Validation(ValidationError::ZeroQuantity(_))
        ));
    }

    #[test]
    fn negative_or_nan_price_is_rejected() {
        assert!(CartLine::new("A", -1.0, 1).validate().is_err());
        assert!(CartLine::new("A", f64::NAN, 1).validate().is_err());
        assert!(CartLine::new("A", 0.0, 1).validate().is_ok());
    }

    #[test]
    fn customer_requires_every_field() {
        assert!(Customer::new("Omar", "0100", "Cairo").validate().is_ok());
        let err = Customer::new("Omar", "  ", "Cairo").validate().unwrap_err();
        assert!(matches!(
            err,
            DukkanError::Validation(ValidationError::EmptyField("phone"))
        ));
        assert!(Customer::new("", "0100", "Cairo").validate().is_err());
        assert!(Customer::new("Omar", "0100", "\n").validate().is_err());
    }

    #[test]
    fn discount_applies_from_threshold_inclusive() {
        let policy = DiscountPolicy::default();
        let at_threshold = policy.apply(500.0);
        assert_eq!(at_threshold.discount, 50.0);
        assert_eq!(at_threshold.payable, 450.0);

        let below = policy.apply(499.999);
        assert_eq!(below.discount, 0.0);
        assert_eq!(below.payable, 499.999);
    }

    #[test]
    fn discount_matches_reference_order() {
        let totals = DiscountPolicy::default().apply(550.0);
        assert_eq!(totals.discount, 55.0);
        assert_eq!(totals.payable, 495.0);
    }

    #[test]
    fn discount_is_the_plain_product() {
        let policy = DiscountPolicy::default();
        for subtotal in [500.05, 999.99, 1234.567] {
            let totals = policy.apply(subtotal);
            assert_eq!(totals.discount, subtotal * 0.10);
            assert_eq!(totals.payable, subtotal - subtotal * 0.10);
        }
    }

    #[test]
    fn id_is_second_resolution_timestamp() {
        let id = InvoiceId::from_timestamp(&at(14, 5, 9));
        assert_eq!(id.as_str(), "20240309_140509");
        assert_eq!(id.file_name("pdf"), "invoice_20240309_140509.pdf");
        assert_eq!(InvoiceId::from_timestamp(&at(14, 5, 9)), id);
        assert_ne!(InvoiceId::from_timestamp(&at(14, 5, 10)), id);
    }

    #[test]
    fn sequence_suffix_only_after_first() {
        let ts = at(8, 0, 0);
        assert_eq!(InvoiceId::with_sequence(&ts, 0).as_str(), "20240309_080000");
        assert_eq!(InvoiceId::with_sequence(&ts, 2).as_str(), "20240309_080000_2");
    }

    #[test]
    fn id_round_trips_through_file_name() {
        let id = InvoiceId::with_sequence(&at(8, 0, 0), 3);
        let name = id.file_name("pdf");
        assert_eq!(InvoiceId::from_file_name(&name, "pdf"), Some(id));
        assert_eq!(InvoiceId::from_file_name("notes.txt", "pdf"), None);
        assert_eq!(InvoiceId::from_file_name("invoice_.pdf", "pdf"), None);
    }
}
