//! Template 1 - classic two-column invoice layout.

use super::{escape_html, validate_invoice};
use crate::invoice::models::InvoiceData;
use crate::pdf::PdfError;

/// Render the classic invoice layout to static HTML.
pub fn render(invoice: &InvoiceData) -> Result<String, PdfError> {
    validate_invoice(invoice)?;

    let currency = escape_html(invoice.details.currency.trim());
    let rows: String = invoice
        .items
        .iter()
        .map(|item| {
            format!(
                r#"      <tr class="border-b border-gray-200">
        <td class="py-2 pr-4 text-sm text-gray-800">{description}</td>
        <td class="py-2 pr-4 text-sm text-right text-gray-600">{quantity}</td>
        <td class="py-2 pr-4 text-sm text-right text-gray-600">{unit_price}</td>
        <td class="py-2 text-sm text-right font-medium text-gray-800">{total} {currency}</td>
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

    let tax_row = match invoice.details.tax_amount {
        Some(tax) => format!(
            r#"      <div class="flex justify-between py-1 text-sm text-gray-600">
        <span>Tax</span><span>{} {currency}</span>
      </div>
"#,
            crate::invoice::models::format_amount(tax),
        ),
        None => String::new(),
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Invoice {invoice_number}</title>
  <style>
    @page {{ size: A4; margin: 14mm; }}
    body {{ -webkit-print-color-adjust: exact; }}
  </style>
</head>
<body class="bg-white font-sans text-gray-900">
  <div class="flex justify-between items-start mb-10">
    <div>
      <h1 class="text-3xl font-bold text-blue-700">INVOICE</h1>
      <p class="text-sm text-gray-500">No. {invoice_number}</p>
    </div>
    <div class="text-right text-sm text-gray-600">
      <p>Issued: {invoice_date}</p>
      <p>Due: {due_date}</p>
    </div>
  </div>
  <div class="grid grid-cols-2 gap-8 mb-10">
    <div>
      <h2 class="text-xs font-semibold uppercase tracking-wide text-gray-400 mb-1">From</h2>
      <p class="text-sm font-medium">{payer_name}</p>
      <p class="text-sm text-gray-600">{payer_address}</p>
      <p class="text-sm text-gray-600">{payer_email}</p>
    </div>
    <div>
      <h2 class="text-xs font-semibold uppercase tracking-wide text-gray-400 mb-1">Bill To</h2>
      <p class="text-sm font-medium">{receiver_name}</p>
      <p class="text-sm text-gray-600">{receiver_address}</p>
      <p class="text-sm text-gray-600">{receiver_locality}</p>
      <p class="text-sm text-gray-600">{receiver_email}</p>
    </div>
  </div>
  <table class="w-full mb-8">
    <thead>
      <tr class="border-b-2 border-gray-300 text-left">
        <th class="py-2 pr-4 text-xs font-semibold uppercase text-gray-500">Description</th>
        <th class="py-2 pr-4 text-xs font-semibold uppercase text-gray-500 text-right">Qty</th>
        <th class="py-2 pr-4 text-xs font-semibold uppercase text-gray-500 text-right">Unit Price</th>
        <th class="py-2 text-xs font-semibold uppercase text-gray-500 text-right">Total</th>
      </tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <div class="flex justify-end">
    <div class="w-64">
      <div class="flex justify-between py-1 text-sm text-gray-600">
        <span>Subtotal</span><span>{subtotal} {currency}</span>
      </div>
{tax_row}      <div class="flex justify-between py-2 border-t-2 border-gray-300 text-base font-bold">
        <span>Total Due</span><span>{total_due} {currency}</span>
      </div>
    </div>
  </div>
</body>
</html>
"#,
        invoice_number = escape_html(&invoice.details.invoice_number),
        invoice_date = escape_html(&invoice.details.invoice_date),
        due_date = escape_html(&invoice.details.due_date),
        payer_name = escape_html(&invoice.payer.name),
        payer_address = escape_html(invoice.payer.address.as_deref().unwrap_or("")),
        payer_email = escape_html(invoice.payer.email.as_deref().unwrap_or("")),
        receiver_name = escape_html(&invoice.receiver.name),
        receiver_address = escape_html(invoice.receiver.address.as_deref().unwrap_or("")),
        receiver_locality = escape_html(&locality(invoice)),
        receiver_email = escape_html(invoice.receiver.email.as_deref().unwrap_or("")),
        rows = rows,
        subtotal = invoice.subtotal(),
        tax_row = tax_row,
        total_due = invoice.total_due(),
        currency = currency,
    ))
}

fn locality(invoice: &InvoiceData) -> String {
    match (&invoice.receiver.zip, &invoice.receiver.city) {
        (Some(zip), Some(city)) => format!("{zip} {city}"),
        (Some(zip), None) => zip.clone(),
        (None, Some(city)) => city.clone(),
        (None, None) => String::new(),
    }
}
