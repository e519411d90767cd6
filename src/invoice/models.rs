use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full invoice document as posted by the authoring UI (camelCase wire format).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub details: InvoiceDetails,
    pub payer: Payer,
    pub receiver: Receiver,
    pub items: Vec<LineItem>,
}

/// Invoice header details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: String,
    /// Template id; unknown ids are rejected, never silently defaulted.
    pub pdf_template: u32,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub tax_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// One invoice line. The `total` field on the wire is a cached value from
/// the form; it is accepted but always re-derived from price and quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub unit_price: f64,
    pub quantity: f64,
    #[serde(default)]
    pub total: Option<f64>,
}

impl LineItem {
    /// Recomputed line total, rounded half-up to 2 decimal places.
    pub fn total(&self) -> String {
        line_total(self.unit_price, self.quantity)
    }
}

impl InvoiceData {
    /// Sum of all recomputed line totals.
    pub fn subtotal(&self) -> String {
        round_money(&self.subtotal_decimal()).to_string()
    }

    /// Subtotal plus the tax amount, if any.
    pub fn total_due(&self) -> String {
        let tax = self
            .details
            .tax_amount
            .map(to_decimal)
            .unwrap_or_else(|| BigDecimal::from(0));
        round_money(&(self.subtotal_decimal() + tax)).to_string()
    }

    fn subtotal_decimal(&self) -> BigDecimal {
        self.items
            .iter()
            .map(|item| line_total_decimal(item.unit_price, item.quantity))
            .sum()
    }
}

/// Compute `unit_price * quantity` rounded half-up to 2 decimals.
///
/// The multiplication happens in exact decimal arithmetic on the shortest
/// decimal representation of each input, so `10.005 * 3` is `30.015` and
/// rounds to `"30.02"` rather than drifting through binary floats.
pub fn line_total(unit_price: f64, quantity: f64) -> String {
    line_total_decimal(unit_price, quantity).to_string()
}

fn line_total_decimal(unit_price: f64, quantity: f64) -> BigDecimal {
    round_money(&(to_decimal(unit_price) * to_decimal(quantity)))
}

/// Format a single amount with 2 decimal places for display.
pub fn format_amount(value: f64) -> String {
    round_money(&to_decimal(value)).to_string()
}

fn to_decimal(value: f64) -> BigDecimal {
    if !value.is_finite() {
        return BigDecimal::from(0);
    }
    // The Display form of a finite f64 is its shortest exact decimal
    // representation, which always parses.
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::from(0))
}

fn round_money(value: &BigDecimal) -> BigDecimal {
    // The trailing with_scale pins the display scale: zero otherwise
    // normalizes to scale 0 and would print as "0" instead of "0.00".
    value.with_scale_round(2, RoundingMode::HalfUp).with_scale(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_rounds_half_up() {
        assert_eq!(line_total(10.005, 3.0), "30.02");
    }

    #[test]
    fn line_total_plain_multiplication() {
        assert_eq!(line_total(100.0, 2.0), "200.00");
        assert_eq!(line_total(19.99, 3.0), "59.97");
    }

    #[test]
    fn zero_amounts_render_with_two_decimals() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(line_total(0.0, 5.0), "0.00");
    }

    #[test]
    fn line_total_non_finite_price_is_zero() {
        assert_eq!(line_total(f64::NAN, 3.0), "0.00");
        assert_eq!(line_total(f64::INFINITY, 3.0), "0.00");
    }

    #[test]
    fn cached_total_is_ignored_in_favor_of_recomputation() {
        let item = LineItem {
            description: "Service".to_string(),
            unit_price: 10.0,
            quantity: 4.0,
            total: Some(9999.0),
        };
        assert_eq!(item.total(), "40.00");
    }

    #[test]
    fn total_due_includes_tax() {
        let invoice: InvoiceData = serde_json::from_value(serde_json::json!({
            "details": {
                "invoiceNumber": "INV-001",
                "invoiceDate": "2024-01-10",
                "dueDate": "2024-02-10",
                "pdfTemplate": 1,
                "currency": "USD",
                "taxAmount": 12.5
            },
            "payer": { "name": "Acme" },
            "receiver": { "name": "Bob" },
            "items": [
                { "description": "Service", "unitPrice": 100, "quantity": 2 },
                { "description": "Support", "unitPrice": 25.25, "quantity": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(invoice.subtotal(), "225.25");
        assert_eq!(invoice.total_due(), "237.75");
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let invoice: InvoiceData = serde_json::from_str(
            r#"{
                "details": {"pdfTemplate": 1, "invoiceNumber": "V-7", "currency": "EUR"},
                "payer": {"name": "Acme"},
                "receiver": {"name": "Bob", "zip": "10115", "city": "Berlin"},
                "items": [{"description": "Service", "unitPrice": 100, "quantity": 2, "total": 200}]
            }"#,
        )
        .unwrap();

        assert_eq!(invoice.details.pdf_template, 1);
        assert_eq!(invoice.receiver.city.as_deref(), Some("Berlin"));
        assert_eq!(invoice.items[0].total, Some(200.0));
    }
}
