//! Application-level Prometheus metrics, exposed alongside the request
//! metrics middleware on `/metrics`.
//!
//! Counters are created unregistered and attached to the middleware's
//! registry at startup via [`register`]; the process-global default
//! registry is never involved.

use lazy_static::lazy_static;
use prometheus::{IntCounter, Registry};

lazy_static! {
    pub static ref PDF_GENERATED_TOTAL: IntCounter = IntCounter::new(
        "invoice_pdf_generated_total",
        "Number of invoice PDFs successfully generated"
    )
    .expect("Failed to create invoice_pdf_generated_total counter");
}

/// Attach all application counters to the registry backing `/metrics`.
/// Call once per registry.
pub fn register(registry: &Registry) {
    registry
        .register(Box::new(PDF_GENERATED_TOTAL.clone()))
        .expect("Failed to register invoice_pdf_generated_total counter");
}
