//! # Bill Settings
//!
//! The explicit configuration object handed to the receipt renderers and
//! the checkout service at construction time. The core never reads ambient
//! state; whoever owns the settings store (the surrounding application)
//! loads these and passes them in.
//!
//! Missing values fall back to the documented defaults below, so a tenant
//! that has never opened the settings screen still prints a usable receipt.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::TaxRate;

/// Receipt and billing configuration for one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BillSettings {
    /// Restaurant display name, centered at the top of every receipt.
    pub restaurant_name: String,

    /// Street address line.
    pub address: String,

    /// Contact phone number.
    pub phone: String,

    /// GST registration number, shown when `show_gst_number` is set.
    pub gstin: Option<String>,

    /// Tax rate in basis points (1800 = 18% GST).
    pub tax_rate_bps: u32,

    /// Currency symbol prefixed to amounts.
    pub currency_symbol: String,

    /// Centered footer line at the bottom of the receipt.
    pub footer_text: String,

    /// Base font size for the display receipt, in points.
    pub font_size: u8,

    /// Render the logo image in the display receipt header.
    pub show_logo: bool,

    /// Print the "Served by" / server line.
    pub show_server_name: bool,

    /// Break tax out as its own row in the totals block.
    pub show_itemized_tax: bool,

    /// Show the GSTIN line in the header.
    pub show_gst_number: bool,

    /// Render the payment QR block ("Scan to Pay").
    pub show_payment_qr: bool,

    /// Logo image reference, used only when `show_logo` is set.
    pub logo_url: Option<String>,

    /// Payment QR image reference, used only when `show_payment_qr` is set.
    pub qr_code_url: Option<String>,
}

impl BillSettings {
    /// The configured tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

impl Default for BillSettings {
    fn default() -> Self {
        BillSettings {
            restaurant_name: "Restaurant".to_string(),
            address: String::new(),
            phone: String::new(),
            gstin: None,
            tax_rate_bps: 0,
            currency_symbol: "₹".to_string(),
            footer_text: "Thank you for dining with us!".to_string(),
            font_size: 12,
            show_logo: false,
            show_server_name: true,
            show_itemized_tax: true,
            show_gst_number: false,
            show_payment_qr: false,
            logo_url: None,
            qr_code_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = BillSettings::default();
        assert_eq!(settings.restaurant_name, "Restaurant");
        assert!(settings.tax_rate().is_zero());
        assert_eq!(settings.currency_symbol, "₹");
        assert!(settings.show_server_name);
        assert!(!settings.show_payment_qr);
    }

    /// Settings stored before newer fields existed must still deserialize,
    /// with the missing fields defaulted.
    #[test]
    fn test_partial_document_deserializes_with_defaults() {
        let json = r#"{"restaurantName":"ezPay Restaurant","taxRateBps":1800}"#;
        let settings: BillSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.restaurant_name, "ezPay Restaurant");
        assert_eq!(settings.tax_rate_bps, 1800);
        assert_eq!(settings.footer_text, "Thank you for dining with us!");
        assert_eq!(settings.font_size, 12);
    }
}
