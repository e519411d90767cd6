//! PDF generation pipeline.
//!
//! Turns a validated [`InvoiceData`](crate::invoice::models::InvoiceData)
//! document into a paginated A4 PDF by rendering an HTML template and
//! driving a headless Chromium instance:
//! - `templates` - template selection and markup rendering
//! - `provisioner` - environment-aware browser launch strategies
//! - `session` - scoped browser/page ownership with guaranteed reclamation
//! - `rasterizer` - content load, stylesheet injection, and PDF export
//! - `pipeline` - the orchestrator sequencing all of the above

pub mod pipeline;
pub mod provisioner;
pub mod rasterizer;
pub mod session;
pub mod templates;
pub mod validation;

pub use pipeline::{PdfPipeline, SessionFactory};
pub use provisioner::{BrowserProvisioner, LocalProvisioner, SandboxedProvisioner};
pub use session::{BrowserSession, RenderSession};

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during PDF generation.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("no invoice template registered for id {0}")]
    UnknownTemplate(u32),
    #[error("template rendering failed: {0}")]
    TemplateRender(String),
    #[error("failed to launch headless browser: {0}")]
    BrowserLaunch(String),
    #[error("page content did not stabilize within {}s", .0.as_secs())]
    RenderTimeout(Duration),
    #[error("pdf rasterization failed: {0}")]
    Rasterization(String),
}

impl PdfError {
    /// Stable kind name carried in the JSON error body.
    pub fn kind(&self) -> &'static str {
        match self {
            PdfError::UnknownTemplate(_) => "UnknownTemplate",
            PdfError::TemplateRender(_) => "TemplateRenderError",
            PdfError::BrowserLaunch(_) => "BrowserLaunchError",
            PdfError::RenderTimeout(_) => "RenderTimeout",
            PdfError::Rasterization(_) => "RasterizationError",
        }
    }
}

/// Result of a successful pipeline run. Immutable once produced; ownership
/// moves to the HTTP handler which streams it out.
#[derive(Debug)]
pub struct PdfArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

impl PdfArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "application/pdf",
            filename: "invoice.pdf",
        }
    }
}
