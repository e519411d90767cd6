//! Pipeline orchestration tests with an instrumented provisioner.
//!
//! A browser is never launched here: the provisioner either must not be
//! reached at all, or fails on purpose so the error path can be observed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use headless_chrome::Browser;
use invoice_pdf_server::invoice::models::{
    InvoiceData, InvoiceDetails, LineItem, Payer, Receiver,
};
use invoice_pdf_server::pdf::{
    BrowserProvisioner, PdfError, PdfPipeline, RenderSession, SessionFactory,
};

/// Counts provision attempts and fails each one.
struct FailingProvisioner {
    calls: AtomicUsize,
}

impl FailingProvisioner {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BrowserProvisioner for FailingProvisioner {
    fn provision(&self) -> Result<Browser, PdfError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PdfError::BrowserLaunch("injected launch failure".to_string()))
    }
}

/// Tracks how many sessions were handed out and how many were dropped.
#[derive(Default)]
struct SessionLedger {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

struct TrackingSession {
    ledger: Arc<SessionLedger>,
    fail_export: bool,
}

impl RenderSession for TrackingSession {
    fn export_pdf(&self, _markup: &str, _stylesheet_url: &str) -> Result<Vec<u8>, PdfError> {
        if self.fail_export {
            Err(PdfError::Rasterization(
                "injected export failure".to_string(),
            ))
        } else {
            Ok(b"%PDF-1.7 stub".to_vec())
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.ledger.closed.fetch_add(1, Ordering::SeqCst);
    }
}

struct TrackingSessionFactory {
    ledger: Arc<SessionLedger>,
    fail_export: bool,
}

impl SessionFactory for TrackingSessionFactory {
    fn open_session(&self) -> Result<Box<dyn RenderSession>, PdfError> {
        self.ledger.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackingSession {
            ledger: self.ledger.clone(),
            fail_export: self.fail_export,
        }))
    }
}

fn sample_invoice(template_id: u32) -> InvoiceData {
    InvoiceData {
        details: InvoiceDetails {
            invoice_number: "INV-100".to_string(),
            invoice_date: "2024-03-01".to_string(),
            due_date: "2024-04-01".to_string(),
            pdf_template: template_id,
            currency: "USD".to_string(),
            tax_amount: None,
        },
        payer: Payer {
            name: "Acme".to_string(),
            address: None,
            email: None,
        },
        receiver: Receiver {
            name: "Bob".to_string(),
            address: None,
            email: None,
            zip: None,
            city: None,
        },
        items: vec![LineItem {
            description: "Service".to_string(),
            unit_price: 100.0,
            quantity: 2.0,
            total: Some(200.0),
        }],
    }
}

#[test]
fn unknown_template_never_provisions_a_browser() {
    let provisioner = FailingProvisioner::new();
    let pipeline = PdfPipeline::new(provisioner.clone(), "https://cdn.example/styles.css");

    match pipeline.generate(&sample_invoice(999)) {
        Err(PdfError::UnknownTemplate(999)) => {}
        other => panic!("expected UnknownTemplate, got {:?}", other.map(|_| ())),
    }
    assert_eq!(provisioner.call_count(), 0);
}

#[test]
fn invalid_invoice_never_provisions_a_browser() {
    let provisioner = FailingProvisioner::new();
    let pipeline = PdfPipeline::new(provisioner.clone(), "https://cdn.example/styles.css");

    let mut invoice = sample_invoice(1);
    invoice.items.clear();

    assert!(matches!(
        pipeline.generate(&invoice),
        Err(PdfError::TemplateRender(_))
    ));
    assert_eq!(provisioner.call_count(), 0);
}

#[test]
fn provisioning_fault_surfaces_as_browser_launch_error() {
    let provisioner = FailingProvisioner::new();
    let pipeline = PdfPipeline::new(provisioner.clone(), "https://cdn.example/styles.css");

    match pipeline.generate(&sample_invoice(1)) {
        Err(PdfError::BrowserLaunch(message)) => {
            assert!(message.contains("injected launch failure"));
        }
        other => panic!("expected BrowserLaunch, got {:?}", other.map(|_| ())),
    }
    assert_eq!(provisioner.call_count(), 1);
}

#[test]
fn pipeline_is_reusable_after_a_failure() {
    let provisioner = FailingProvisioner::new();
    let pipeline = PdfPipeline::new(provisioner.clone(), "https://cdn.example/styles.css");

    assert!(pipeline.generate(&sample_invoice(1)).is_err());
    assert!(pipeline.generate(&sample_invoice(1)).is_err());
    assert_eq!(provisioner.call_count(), 2);
}

#[test]
fn session_is_reclaimed_when_export_faults_after_provisioning() {
    let ledger = Arc::new(SessionLedger::default());
    let pipeline = PdfPipeline::with_session_factory(
        Arc::new(TrackingSessionFactory {
            ledger: ledger.clone(),
            fail_export: true,
        }),
        "https://cdn.example/styles.css",
    );

    assert!(matches!(
        pipeline.generate(&sample_invoice(1)),
        Err(PdfError::Rasterization(_))
    ));
    assert_eq!(ledger.opened.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn every_opened_session_is_closed_across_outcomes() {
    let ledger = Arc::new(SessionLedger::default());
    let pipeline = PdfPipeline::with_session_factory(
        Arc::new(TrackingSessionFactory {
            ledger: ledger.clone(),
            fail_export: false,
        }),
        "https://cdn.example/styles.css",
    );

    let artifact = pipeline.generate(&sample_invoice(1)).expect("render");
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    pipeline.generate(&sample_invoice(2)).expect("second render");

    assert_eq!(ledger.opened.load(Ordering::SeqCst), 2);
    assert_eq!(ledger.closed.load(Ordering::SeqCst), 2);
}

/// End-to-end rasterization against an installed Chrome/Chromium.
/// Run with `cargo test -- --ignored` on a machine with a browser.
#[test]
#[ignore = "requires a locally installed Chrome/Chromium"]
fn local_browser_produces_a_pdf_and_reclaims_the_session() {
    let pipeline = PdfPipeline::new(
        Arc::new(invoice_pdf_server::pdf::LocalProvisioner),
        invoice_pdf_server::config::DEFAULT_TAILWIND_CDN,
    );

    let artifact = pipeline
        .generate(&sample_invoice(1))
        .expect("local browser should render the invoice");
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert_eq!(artifact.content_type, "application/pdf");

    // A second run proves the first session was fully reclaimed.
    let again = pipeline.generate(&sample_invoice(2)).expect("second render");
    assert!(!again.bytes.is_empty());
}
