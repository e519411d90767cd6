//! Pipeline orchestrator.
//!
//! Sequences template selection, markup rendering, browser provisioning,
//! and rasterization. Any failure short-circuits; the browser session (if
//! one was opened) is reclaimed by scope exit on both paths. There is no
//! retry loop here - a request either completes once or fails, and any
//! retry is the caller's responsibility.

use std::sync::Arc;

use crate::invoice::models::InvoiceData;
use crate::pdf::session::RenderSession;
use crate::pdf::{templates, BrowserProvisioner, BrowserSession, PdfArtifact, PdfError};

/// Opens one rendering session per invocation. The pipeline holds the
/// factory; tests substitute one that does not launch a browser.
pub trait SessionFactory: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn RenderSession>, PdfError>;
}

/// Chromium-backed factory: provisions a fresh browser per call and
/// wraps it in a [`BrowserSession`].
struct ChromeSessionFactory {
    provisioner: Arc<dyn BrowserProvisioner>,
}

impl SessionFactory for ChromeSessionFactory {
    fn open_session(&self) -> Result<Box<dyn RenderSession>, PdfError> {
        let browser = self.provisioner.provision()?;
        Ok(Box::new(BrowserSession::open(browser)?))
    }
}

pub struct PdfPipeline {
    sessions: Arc<dyn SessionFactory>,
    stylesheet_url: String,
}

impl PdfPipeline {
    pub fn new(provisioner: Arc<dyn BrowserProvisioner>, stylesheet_url: impl Into<String>) -> Self {
        Self::with_session_factory(Arc::new(ChromeSessionFactory { provisioner }), stylesheet_url)
    }

    pub fn with_session_factory(
        sessions: Arc<dyn SessionFactory>,
        stylesheet_url: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            stylesheet_url: stylesheet_url.into(),
        }
    }

    /// Generate a PDF for one invoice.
    ///
    /// Blocking: drives a browser process to completion. Callers on an
    /// async runtime run this through `web::block` so concurrent
    /// invocations stay independent; each call owns its own browser.
    pub fn generate(&self, invoice: &InvoiceData) -> Result<PdfArtifact, PdfError> {
        // Template selection and markup rendering come first so invalid
        // requests never provision a browser.
        let template = templates::select(invoice.details.pdf_template)?;
        let markup = template(invoice)?;

        let session = self.sessions.open_session()?;
        let bytes = session.export_pdf(&markup, &self.stylesheet_url)?;

        log::info!(
            "rendered invoice '{}' with template {} ({} bytes)",
            invoice.details.invoice_number,
            invoice.details.pdf_template,
            bytes.len()
        );
        Ok(PdfArtifact::new(bytes))
    }
}
