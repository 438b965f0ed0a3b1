//! Store configuration
//!
//! Defaults describe the shop as it opened. Environment variables overlay them at
//! startup and command-line flags overlay the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DUKKAN_INVOICE_DIR` | [`StoreConfig::output_dir`] |
//! | `DUKKAN_FONT` | [`StoreConfig::font_path`] |
//! | `DUKKAN_CURRENCY` | [`StoreConfig::currency_label`] |
//! | `DUKKAN_STORE_NAME` | [`StoreConfig::store_name`] |
//! | `DUKKAN_DISCOUNT_THRESHOLD` | [`DiscountPolicy::threshold`] |
//! | `DUKKAN_DISCOUNT_RATE` | [`DiscountPolicy::rate`], a fraction in `0..=1` |
//! | `DUKKAN_DECORATE` | [`StoreConfig::decorate`], `1`/`true` or `0`/`false` |

use std::path::PathBuf;

use crate::error::{DukkanError, Result};
use crate::order::DiscountPolicy;
use crate::types::ShapeOptions;

pub const ENV_INVOICE_DIR: &str = "DUKKAN_INVOICE_DIR";
pub const ENV_FONT: &str = "DUKKAN_FONT";
pub const ENV_CURRENCY: &str = "DUKKAN_CURRENCY";
pub const ENV_STORE_NAME: &str = "DUKKAN_STORE_NAME";
pub const ENV_DISCOUNT_THRESHOLD: &str = "DUKKAN_DISCOUNT_THRESHOLD";
pub const ENV_DISCOUNT_RATE: &str = "DUKKAN_DISCOUNT_RATE";
pub const ENV_DECORATE: &str = "DUKKAN_DECORATE";

/// Everything the storefront and renderer need to know about the shop
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Shown in the invoice title and the thank-you line
    pub store_name: String,
    /// Printed after every amount
    pub currency_label: String,
    pub discount: DiscountPolicy,
    /// Directory invoices are written into, created on demand
    pub output_dir: PathBuf,
    /// Right-to-left capable font; discovered on the system when unset
    pub font_path: Option<PathBuf>,
    pub shaping: ShapeOptions,
    /// Frame the title and thank-you line with 🧾 and 🎉
    pub decorate: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "أولاد عياد".to_string(),
            currency_label: "ج.م".to_string(),
            discount: DiscountPolicy::default(),
            output_dir: PathBuf::from("invoices"),
            font_path: None,
            shaping: ShapeOptions::default(),
            decorate: false,
        }
    }
}

impl StoreConfig {
    /// Defaults overlaid with `DUKKAN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key/value source
    ///
    /// Blank values are ignored. Values that do not parse fail with
    /// [`DukkanError::Config`].
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = value(ENV_INVOICE_DIR) {
            log::info!("Invoice directory set to {} via {}", dir, ENV_INVOICE_DIR);
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(font) = value(ENV_FONT) {
            log::info!("Font set to {} via {}", font, ENV_FONT);
            self.font_path = Some(PathBuf::from(font));
        }
        if let Some(currency) = value(ENV_CURRENCY) {
            log::info!("Currency label set via {}", ENV_CURRENCY);
            self.currency_label = currency;
        }
        if let Some(name) = value(ENV_STORE_NAME) {
            log::info!("Store name set via {}", ENV_STORE_NAME);
            self.store_name = name;
        }
        if let Some(threshold) = value(ENV_DISCOUNT_THRESHOLD) {
            let threshold = parse_amount(ENV_DISCOUNT_THRESHOLD, &threshold)?;
            log::info!("Discount threshold set to {} via {}", threshold, ENV_DISCOUNT_THRESHOLD);
            self.discount.threshold = threshold;
        }
        if let Some(rate) = value(ENV_DISCOUNT_RATE) {
            let rate = parse_amount(ENV_DISCOUNT_RATE, &rate)?;
            if rate > 1.0 {
                return Err(DukkanError::Config(format!(
                    "{} must be a fraction between 0 and 1, got {}",
                    ENV_DISCOUNT_RATE, rate
                )));
            }
            log::info!("Discount rate set to {} via {}", rate, ENV_DISCOUNT_RATE);
            self.discount.rate = rate;
        }
        if let Some(flag) = value(ENV_DECORATE) {
            self.decorate = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(DukkanError::Config(format!(
                        "{} must be true or false, got {:?}",
                        ENV_DECORATE, other
                    )))
                },
            };
            log::info!("Invoice decoration {} via {}", self.decorate, ENV_DECORATE);
        }
        Ok(self)
    }
}

/// A finite, non-negative number
fn parse_amount(key: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(DukkanError::Config(format!(
            "{} must be a non-negative number, got {:?}",
            key, raw
        ))),
    }
}
