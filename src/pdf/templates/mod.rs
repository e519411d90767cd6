//! Invoice template registry and markup rendering.
//!
//! Each template is a pure function from [`InvoiceData`] to a
//! self-contained static HTML string: every field is interpolated and
//! escaped up front, so the headless renderer needs no script execution
//! for content, only the injected utility stylesheet for presentation.

pub mod classic;
pub mod compact;

use crate::invoice::models::InvoiceData;
use crate::pdf::validation::{validate_amount, validate_required, ValidationErrors};
use crate::pdf::PdfError;

/// A template render function, selected by `details.pdfTemplate`.
pub type TemplateFn = fn(&InvoiceData) -> Result<String, PdfError>;

/// Resolve a template id to its render function.
///
/// Unknown ids fail explicitly; there is no fallback template.
pub fn select(template_id: u32) -> Result<TemplateFn, PdfError> {
    match template_id {
        1 => Ok(classic::render),
        2 => Ok(compact::render),
        other => Err(PdfError::UnknownTemplate(other)),
    }
}

/// Validate the fields every template interpolates.
pub(crate) fn validate_invoice(invoice: &InvoiceData) -> Result<(), PdfError> {
    let mut errors = ValidationErrors::new();

    validate_required(&invoice.payer.name, "payer.name", "Payer name", &mut errors);
    validate_required(
        &invoice.receiver.name,
        "receiver.name",
        "Receiver name",
        &mut errors,
    );

    if invoice.items.is_empty() {
        errors.add(crate::pdf::validation::ValidationError::new(
            "items",
            "invoice must contain at least one line item",
        ));
    }
    for (i, item) in invoice.items.iter().enumerate() {
        validate_required(
            &item.description,
            &format!("items[{i}].description"),
            "Item description",
            &mut errors,
        );
        validate_amount(item.unit_price, &format!("items[{i}].unitPrice"), &mut errors);
        validate_amount(item.quantity, &format!("items[{i}].quantity"), &mut errors);
    }
    if let Some(tax) = invoice.details.tax_amount {
        validate_amount(tax, "details.taxAmount", &mut errors);
    }

    errors.into_result().map_err(PdfError::TemplateRender)
}

/// Escape special characters for HTML interpolation.
pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
