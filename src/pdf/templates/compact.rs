//! Template 2 - compact payment-voucher layout.
//!
//! Single dense block with a dark header strip, suited to short vouchers
//! with a handful of line items.

use super::{escape_html, validate_invoice};
use crate::invoice::models::InvoiceData;
use crate::pdf::PdfError;

/// Render the compact voucher layout to static HTML.
pub fn render(invoice: &InvoiceData) -> Result<String, PdfError> {
    validate_invoice(invoice)?;

    let currency = escape_html(invoice.details.currency.trim());
    let rows: String = invoice
        .items
        .iter()
        .map(|item| {
            format!(
                r#"      <tr>
        <td class="py-1 pr-3 text-xs text-gray-700">{description}</td>
        <td class="py-1 pr-3 text-xs text-right text-gray-500">{quantity} x {unit_price}</td>
        <td class="py-1 text-xs text-right text-gray-800">{total} {currency}</td>
      </tr>
"#,
                description = escape_html(&item.description),
                quantity = item.quantity,
                unit_price = crate::invoice::models::format_amount(item.unit_price),
                total = item.total(),
                currency = currency,
            )
        })
        .collect();

    let tax_line = match invoice.details.tax_amount {
        Some(tax) => format!(
            "Tax: {} {currency} &middot; ",
            crate::invoice::models::format_amount(tax),
        ),
        None => String::new(),
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Payment Voucher {invoice_number}</title>
  <style>
    @page {{ size: A4; margin: 12mm; }}
    body {{ -webkit-print-color-adjust: exact; }}
  </style>
</head>
<body class="bg-white font-sans text-gray-900">
  <div class="bg-gray-900 text-white px-6 py-4 mb-6 rounded">
    <div class="flex justify-between items-center">
      <h1 class="text-xl font-semibold">Payment Voucher</h1>
      <span class="text-sm text-gray-300">{invoice_number}</span>
    </div>
    <p class="text-xs text-gray-400 mt-1">Issued {invoice_date} &middot; due {due_date}</p>
  </div>
  <div class="flex justify-between text-sm mb-6">
    <div>
      <p class="text-xs uppercase text-gray-400">Payer</p>
      <p class="font-medium">{payer_name}</p>
      <p class="text-gray-600">{payer_address}</p>
    </div>
    <div class="text-right">
      <p class="text-xs uppercase text-gray-400">Receiver</p>
      <p class="font-medium">{receiver_name}</p>
      <p class="text-gray-600">{receiver_address}</p>
    </div>
  </div>
  <table class="w-full mb-4 border-t border-b border-gray-200">
    <tbody>
{rows}    </tbody>
  </table>
  <p class="text-right text-xs text-gray-500 mb-1">{tax_line}Subtotal: {subtotal} {currency}</p>
  <p class="text-right text-lg font-bold">Amount Due: {total_due} {currency}</p>
</body>
</html>
"#,
        invoice_number = escape_html(&invoice.details.invoice_number),
        invoice_date = escape_html(&invoice.details.invoice_date),
        due_date = escape_html(&invoice.details.due_date),
        payer_name = escape_html(&invoice.payer.name),
        payer_address = escape_html(invoice.payer.address.as_deref().unwrap_or("")),
        receiver_name = escape_html(&invoice.receiver.name),
        receiver_address = escape_html(invoice.receiver.address.as_deref().unwrap_or("")),
        rows = rows,
        tax_line = tax_line,
        subtotal = invoice.subtotal(),
        total_due = invoice.total_due(),
        currency = currency,
    ))
}
