//! # Receipt Formatter
//!
//! Two independent renderers over the same finalized bill:
//!
//! - [`render_thermal`]: fixed-width plaintext for 80mm thermal printers.
//!   The layout is a strict 48-column contract; cashiers paste the text
//!   straight into the printer utility.
//! - [`render_display`]: a structured document the frontend lays out for
//!   screen display and print-to-PDF.
//!
//! Both are pure functions of `(&BillSettings, &Transaction)`: no clock,
//! no ambient state, no mutation. Missing optional settings fall back to
//! the defaults documented on [`BillSettings`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::format_amount;
use crate::settings::BillSettings;
use crate::types::Transaction;

/// Line width for 80mm thermal paper (48 characters).
pub const LINE_WIDTH: usize = 48;

/// Item-name column width on the thermal receipt.
const NAME_WIDTH: usize = 20;

// =============================================================================
// Fixed-Width Helpers
// =============================================================================

/// Centers text by padding both sides equally (odd leftovers drop).
fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{0}{text}{0}", " ".repeat(padding))
}

/// Left/right justifies two fragments to `width`.
///
/// When they cannot both fit, falls back to `left + " " + right` rather
/// than wrapping; the printer clips, it never reflows.
fn justify_text(left: &str, right: &str, width: usize) -> String {
    let total = left.chars().count() + right.chars().count();
    if total >= width {
        return format!("{left} {right}");
    }
    format!("{left}{}{right}", " ".repeat(width - total))
}

/// Truncates to at most `max` characters (char-aware, not byte-aware).
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// Thermal Renderer
// =============================================================================

/// Renders the 48-column plaintext receipt.
///
/// Structure, top to bottom: centered restaurant header; dashed rule;
/// centered title; id/date line; server and optional customer lines;
/// payment method; item table (name 20, qty 3, price 6, total 6); totals
/// block; centered footer; trailing blank lines so the printer can cut.
pub fn render_thermal(settings: &BillSettings, tx: &Transaction) -> String {
    let dash_line = "-".repeat(LINE_WIDTH);
    let symbol = settings.currency_symbol.as_str();
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push(center_text(&settings.restaurant_name, LINE_WIDTH));
    lines.push(center_text(&settings.address, LINE_WIDTH));
    lines.push(center_text(&format!("Phone: {}", settings.phone), LINE_WIDTH));
    lines.push(dash_line.clone());

    // Bill details
    lines.push(center_text("Bill Receipt", LINE_WIDTH));
    let date = tx
        .created_at
        .map(|ts| {
            ts.with_timezone(&chrono::Local)
                .format("%d/%m/%Y")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    lines.push(justify_text(
        &format!("Bill ID: {}", truncate_chars(&tx.id, 8)),
        &format!("Date: {date}"),
        LINE_WIDTH,
    ));
    lines.push(format!(
        "Served by: {}",
        truncate_chars(&tx.employee_name, LINE_WIDTH - 11)
    ));
    if let Some(name) = &tx.customer_name {
        lines.push(format!(
            "Customer: {}",
            truncate_chars(name, LINE_WIDTH - 10)
        ));
    }
    if let Some(phone) = &tx.customer_phone {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(table) = &tx.table_number {
        lines.push(format!("Table: {table}"));
    }
    lines.push(format!("Payment: {}", tx.payment_method.label()));
    lines.push(dash_line.clone());

    // Items header
    lines.push(justify_text("Item", "Qty  Price  Total", LINE_WIDTH));
    lines.push(dash_line.clone());

    // Items
    for line in &tx.items {
        let name = format!("{:<NAME_WIDTH$}", truncate_chars(&line.name, NAME_WIDTH));
        let qty = format!("{:>3}", line.quantity);
        let price = format!("{:>6}", line.unit_price().to_string());
        let total = format!("{:>6}", line.line_total().to_string());
        lines.push(format!("{name} {qty}  {price}  {total}"));
    }

    lines.push(dash_line.clone());

    // Summary
    lines.push(justify_text(
        "Subtotal:",
        &format_amount(tx.subtotal(), symbol),
        LINE_WIDTH,
    ));
    lines.push(justify_text(
        &format!("GST ({}%):", settings.tax_rate().percent_label()),
        &format_amount(tx.tax(), symbol),
        LINE_WIDTH,
    ));
    lines.push(justify_text(
        "Total:",
        &format_amount(tx.total(), symbol),
        LINE_WIDTH,
    ));
    lines.push(dash_line);

    // Footer
    lines.push(center_text(&settings.footer_text, LINE_WIDTH));

    // Extra line feeds so the thermal printer can cut the paper
    let mut out = lines.join("\n");
    out.push_str("\n\n\n\n");
    out
}

// =============================================================================
// Display Renderer
// =============================================================================

/// Header block of the display receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptHeader {
    /// Present only when the settings enable the logo and reference one.
    pub logo_url: Option<String>,
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    /// Present only when the settings enable the GSTIN line.
    pub gstin: Option<String>,
    pub date: String,
}

/// One item row, amounts pre-formatted with the currency prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// Itemized tax row, present when `show_itemized_tax` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptTax {
    /// Rate label without the percent sign ("18", "8.25").
    pub rate: String,
    pub amount: String,
}

/// Payment QR block ("Scan to Pay").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptQr {
    pub caption: String,
    pub qr_code_url: String,
}

/// The structured receipt consumed by the screen/PDF layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayReceipt {
    pub header: ReceiptHeader,
    pub bill_no: String,
    pub table_number: Option<String>,
    /// Present only when the settings show the server line.
    pub server_name: Option<String>,
    pub items: Vec<ReceiptLine>,
    pub subtotal: String,
    pub tax: Option<ReceiptTax>,
    pub total: String,
    pub payment_qr: Option<ReceiptQr>,
    pub footer: String,
    /// Base font size in points, from settings.
    pub font_size: u8,
}

/// Builds the structured receipt.
///
/// Every amount goes through the shared [`format_amount`] so screen and
/// thermal output can never disagree on rounding or symbol.
pub fn render_display(settings: &BillSettings, tx: &Transaction) -> DisplayReceipt {
    let symbol = settings.currency_symbol.as_str();

    let date = tx
        .created_at
        .map(|ts| {
            ts.with_timezone(&chrono::Local)
                .format("%d/%m/%Y %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());

    DisplayReceipt {
        header: ReceiptHeader {
            logo_url: if settings.show_logo {
                settings.logo_url.clone()
            } else {
                None
            },
            restaurant_name: settings.restaurant_name.clone(),
            address: settings.address.clone(),
            phone: settings.phone.clone(),
            gstin: if settings.show_gst_number {
                settings.gstin.clone()
            } else {
                None
            },
            date,
        },
        bill_no: tx.id.clone(),
        table_number: tx.table_number.clone(),
        server_name: if settings.show_server_name {
            Some(tx.employee_name.clone())
        } else {
            None
        },
        items: tx
            .items
            .iter()
            .map(|line| ReceiptLine {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: format_amount(line.unit_price(), symbol),
                line_total: format_amount(line.line_total(), symbol),
            })
            .collect(),
        subtotal: format_amount(tx.subtotal(), symbol),
        tax: if settings.show_itemized_tax {
            Some(ReceiptTax {
                rate: settings.tax_rate().percent_label(),
                amount: format_amount(tx.tax(), symbol),
            })
        } else {
            None
        },
        total: format_amount(tx.total(), symbol),
        payment_qr: match (&settings.qr_code_url, settings.show_payment_qr) {
            (Some(url), true) => Some(ReceiptQr {
                caption: "Scan to Pay".to_string(),
                qr_code_url: url.clone(),
            }),
            _ => None,
        },
        footer: settings.footer_text.clone(),
        font_size: settings.font_size,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, PaymentMethod, TransactionStatus};
    use chrono::Utc;

    fn line(name: &str, price_minor: i64, qty: i64) -> LineItem {
        LineItem {
            product_id: format!("id-{name}"),
            name: name.to_string(),
            unit_price_minor: price_minor,
            quantity: qty,
            section_id: None,
        }
    }

    fn bill() -> Transaction {
        Transaction {
            id: "a1b2c3d4e5f6".to_string(),
            restaurant_id: "r1".to_string(),
            items: vec![line("Garlic Bread", 19900, 2), line("Coffee", 12900, 1)],
            subtotal_minor: 52700,
            tax_minor: 9486,
            total_minor: 62186,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            customer_name: Some("Priya".to_string()),
            customer_phone: Some("98765 43210".to_string()),
            table_number: Some("12".to_string()),
            employee_id: "e1".to_string(),
            employee_name: "Asha".to_string(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    fn settings() -> BillSettings {
        BillSettings {
            restaurant_name: "ezPay Restaurant".to_string(),
            address: "123 Main Street, City".to_string(),
            phone: "+91 123-456-7890".to_string(),
            tax_rate_bps: 1800,
            ..BillSettings::default()
        }
    }

    #[test]
    fn test_thermal_structure() {
        let text = render_thermal(&settings(), &bill());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "ezPay Restaurant");
        assert_eq!(lines[1].trim(), "123 Main Street, City");
        assert_eq!(lines[2].trim(), "Phone: +91 123-456-7890");
        assert_eq!(lines[3], "-".repeat(LINE_WIDTH));
        assert_eq!(lines[4].trim(), "Bill Receipt");
        assert!(lines[5].starts_with("Bill ID: a1b2c3d4"));
        assert!(lines[5].contains("Date: "));
        assert_eq!(lines[6], "Served by: Asha");
        assert_eq!(lines[7], "Customer: Priya");
        assert_eq!(lines[8], "Phone: 98765 43210");
        assert_eq!(lines[9], "Table: 12");
        assert_eq!(lines[10], "Payment: Cash");

        // totals block carries the currency symbol
        assert!(text.contains("Subtotal:"));
        assert!(text.contains("₹527.00"));
        assert!(text.contains("GST (18%):"));
        assert!(text.contains("₹94.86"));
        assert!(text.contains("₹621.86"));
        assert!(text.contains("Thank you for dining with us!"));

        // paper-feed trailer
        assert!(text.ends_with("\n\n\n\n"));
    }

    #[test]
    fn test_thermal_lines_fit_width() {
        let text = render_thermal(&settings(), &bill());
        for line in text.lines() {
            assert!(
                line.chars().count() <= LINE_WIDTH,
                "line overflows: {line:?}"
            );
        }
    }

    /// Round-trip: the rendered item lines can be re-parsed back into
    /// name (truncated to 20 chars), quantity, unit price, and line total.
    #[test]
    fn test_thermal_item_lines_round_trip() {
        let tx = Transaction {
            items: vec![
                line("Garlic Bread", 19900, 2),
                line("A Very Long Dish Name Indeed", 100000, 12),
            ],
            ..bill()
        };
        let text = render_thermal(&settings(), &tx);
        let lines: Vec<&str> = text.lines().collect();

        // item rows sit between the third and fourth dashed rules
        let dash = "-".repeat(LINE_WIDTH);
        let rules: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == dash)
            .map(|(i, _)| i)
            .collect();
        let rows = &lines[rules[2] + 1..rules[3]];
        assert_eq!(rows.len(), 2);

        for (row, item) in rows.iter().zip(&tx.items) {
            let name: String = row.chars().take(20).collect();
            assert_eq!(name.trim(), item.name.chars().take(20).collect::<String>());

            let rest: Vec<&str> = row[row.char_indices().nth(20).unwrap().0..]
                .split_whitespace()
                .collect();
            assert_eq!(rest[0].parse::<i64>().unwrap(), item.quantity);
            assert_eq!(rest[1], item.unit_price().to_string());
            assert_eq!(rest[2], item.line_total().to_string());
        }
    }

    #[test]
    fn test_thermal_omits_absent_customer_fields() {
        let tx = Transaction {
            customer_name: None,
            customer_phone: None,
            table_number: None,
            ..bill()
        };
        let text = render_thermal(&settings(), &tx);
        assert!(!text.contains("Customer:"));
        assert!(!text.contains("Table:"));
        // the header's own phone line stays
        assert_eq!(text.matches("Phone:").count(), 1);
    }

    #[test]
    fn test_justify_falls_back_instead_of_overflowing() {
        let left = "L".repeat(30);
        let right = "R".repeat(30);
        let joined = justify_text(&left, &right, LINE_WIDTH);
        assert_eq!(joined, format!("{left} {right}"));

        let fitted = justify_text("Subtotal:", "₹5.00", LINE_WIDTH);
        assert_eq!(fitted.chars().count(), LINE_WIDTH);
        assert!(fitted.ends_with("₹5.00"));
    }

    #[test]
    fn test_center_text_longer_than_width() {
        let wide = "X".repeat(60);
        assert_eq!(center_text(&wide, LINE_WIDTH), wide);
    }

    #[test]
    fn test_display_receipt_full_settings() {
        let s = BillSettings {
            gstin: Some("29ABCDE1234F1Z5".to_string()),
            show_gst_number: true,
            show_logo: true,
            logo_url: Some("logo.png".to_string()),
            show_payment_qr: true,
            qr_code_url: Some("upi.png".to_string()),
            ..settings()
        };
        let receipt = render_display(&s, &bill());

        assert_eq!(receipt.header.restaurant_name, "ezPay Restaurant");
        assert_eq!(receipt.header.logo_url.as_deref(), Some("logo.png"));
        assert_eq!(receipt.header.gstin.as_deref(), Some("29ABCDE1234F1Z5"));
        assert_eq!(receipt.bill_no, "a1b2c3d4e5f6");
        assert_eq!(receipt.server_name.as_deref(), Some("Asha"));
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].unit_price, "₹199.00");
        assert_eq!(receipt.items[0].line_total, "₹398.00");
        assert_eq!(receipt.subtotal, "₹527.00");
        let tax = receipt.tax.unwrap();
        assert_eq!(tax.rate, "18");
        assert_eq!(tax.amount, "₹94.86");
        assert_eq!(receipt.total, "₹621.86");
        let qr = receipt.payment_qr.unwrap();
        assert_eq!(qr.caption, "Scan to Pay");
        assert_eq!(qr.qr_code_url, "upi.png");
    }

    /// Missing settings substitute documented defaults: name "Restaurant",
    /// tax rate 0, and every optional block absent.
    #[test]
    fn test_display_receipt_defaults() {
        let receipt = render_display(&BillSettings::default(), &bill());

        assert_eq!(receipt.header.restaurant_name, "Restaurant");
        assert_eq!(receipt.header.logo_url, None);
        assert_eq!(receipt.header.gstin, None);
        assert_eq!(receipt.payment_qr, None);
        // itemized tax defaults on, at the default 0% rate
        assert_eq!(receipt.tax.unwrap().rate, "0");
        assert_eq!(receipt.footer, "Thank you for dining with us!");
    }

    #[test]
    fn test_display_receipt_flags_off() {
        let s = BillSettings {
            show_server_name: false,
            show_itemized_tax: false,
            // QR url present but the flag is off
            qr_code_url: Some("upi.png".to_string()),
            show_payment_qr: false,
            ..settings()
        };
        let receipt = render_display(&s, &bill());
        assert_eq!(receipt.server_name, None);
        assert_eq!(receipt.tax, None);
        assert_eq!(receipt.payment_qr, None);
    }
}
