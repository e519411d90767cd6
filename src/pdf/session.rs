//! Scoped ownership of one browser process and its page.
//!
//! A session lives for exactly one rasterization call. Reclamation happens
//! in `Drop`, so it runs once on the success path and on every failure
//! path without duplicated cleanup code. Cleanup failures are logged and
//! never allowed to mask the primary result.

use std::sync::Arc;

use headless_chrome::{Browser, Tab};

use crate::pdf::{rasterizer, PdfError};

/// One provisioned rendering session. An implementation owns whatever
/// resources the export needs and releases them when dropped.
pub trait RenderSession {
    fn export_pdf(&self, markup: &str, stylesheet_url: &str) -> Result<Vec<u8>, PdfError>;
}

pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Take ownership of a freshly provisioned browser and open its page.
    pub fn open(browser: Browser) -> Result<Self, PdfError> {
        let tab = browser
            .new_tab()
            .map_err(|e| PdfError::Rasterization(format!("failed to open page: {e:#}")))?;
        Ok(Self { browser, tab })
    }

    /// The page this session rasterizes into.
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }
}

impl RenderSession for BrowserSession {
    fn export_pdf(&self, markup: &str, stylesheet_url: &str) -> Result<Vec<u8>, PdfError> {
        rasterizer::rasterize(self, markup, stylesheet_url)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Close every page, including any the browser opened on its own.
        if let Ok(tabs) = self.browser.get_tabs().lock() {
            for tab in tabs.iter() {
                if let Err(e) = tab.close(true) {
                    log::warn!("failed to close page during cleanup: {e:#}");
                }
            }
        }
        // The Browser drop that follows terminates the process itself.
    }
}
