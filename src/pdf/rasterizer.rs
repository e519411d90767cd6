//! Markup-to-PDF rasterization through a live browser session.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::Tab;

use crate::pdf::{BrowserSession, PdfError};

/// Bound on the content-load wait. Exceeding it is the pipeline's only
/// cancellation mechanism.
pub const CONTENT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

// A4 in inches, matching the `format: "a4"` capture of the authoring UI.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.7;

/// Load `markup` into the session's page, inject the hosted utility
/// stylesheet, and export the page as a paginated A4 PDF.
pub fn rasterize(
    session: &BrowserSession,
    markup: &str,
    stylesheet_url: &str,
) -> Result<Vec<u8>, PdfError> {
    let tab = session.tab();
    tab.set_default_timeout(CONTENT_LOAD_TIMEOUT);

    // Ship the markup as a data URL; the page has no subresources of its
    // own, so navigation completion means the content is stable.
    let data_url = format!("data:text/html;base64,{}", BASE64.encode(markup));
    tab.navigate_to(&data_url).map_err(classify_load_error)?;
    tab.wait_until_navigated().map_err(classify_load_error)?;

    // Utility class names in the markup only take visual effect once the
    // hosted stylesheet has resolved; capture must wait for it.
    inject_stylesheet(tab, stylesheet_url)?;

    tab.print_to_pdf(Some(a4_print_options()))
        .map_err(|e| PdfError::Rasterization(format!("pdf export failed: {e:#}")))
}

fn a4_print_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        // Print CSS in the markup (`@page { size: ... }`) wins over the
        // defaults above.
        prefer_css_page_size: Some(true),
        ..Default::default()
    }
}

fn inject_stylesheet(tab: &Tab, stylesheet_url: &str) -> Result<(), PdfError> {
    let expression = format!(
        r#"new Promise((resolve, reject) => {{
            const link = document.createElement('link');
            link.rel = 'stylesheet';
            link.href = '{}';
            link.onload = () => resolve('loaded');
            link.onerror = () => reject(new Error('stylesheet failed to load'));
            document.head.appendChild(link);
        }})"#,
        stylesheet_url.replace('\\', "\\\\").replace('\'', "\\'"),
    );
    tab.evaluate(&expression, true)
        .map_err(|e| PdfError::Rasterization(format!("stylesheet injection failed: {e:#}")))?;
    Ok(())
}

fn classify_load_error(err: anyhow::Error) -> PdfError {
    // The content-load waits surface expiry as `util::Timeout`.
    if err.downcast_ref::<headless_chrome::util::Timeout>().is_some() {
        PdfError::RenderTimeout(CONTENT_LOAD_TIMEOUT)
    } else {
        PdfError::Rasterization(format!("navigation failed: {err:#}"))
    }
}
