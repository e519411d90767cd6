use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod invoice;
pub mod metrics;
pub mod pdf;
pub mod records;

use crate::config::AppConfig;
use crate::pdf::{PdfError, PdfPipeline};
use crate::records::RecordStore;

/// JSON error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, details: &str) -> Self {
        Self {
            error: error_type.to_string(),
            details: details.to_string(),
        }
    }

    pub fn bad_request(details: &str) -> Self {
        Self::new("BadRequest", details)
    }

    pub fn unauthorized(details: &str) -> Self {
        Self::new("Unauthorized", details)
    }

    pub fn internal_error(details: &str) -> Self {
        Self::new("InternalServerError", details)
    }

    /// Carry the pipeline failure kind plus the underlying message.
    pub fn pdf_failure(err: &PdfError) -> Self {
        Self::new(err.kind(), &err.to_string())
    }
}

/// Shared application state: the record store and the PDF pipeline with
/// its startup-selected browser provisioner.
pub struct AppState {
    pub records: RecordStore,
    pub pipeline: Arc<PdfPipeline>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let provisioner = pdf::provisioner::from_config(config);
        Self {
            records: RecordStore::new(),
            pipeline: Arc::new(PdfPipeline::new(provisioner, config.tailwind_cdn.clone())),
        }
    }
}

pub async fn run() -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::invoice::handlers::generate_invoice,
            crate::records::handlers::get_payers_combined,
            crate::records::handlers::create_payer_combined,
            crate::records::handlers::get_receivers_combined,
            crate::records::handlers::create_receiver_combined,
            crate::records::handlers::get_payer_addresses,
            crate::records::handlers::create_payer_address,
        ),
        components(
            schemas(
                invoice::models::InvoiceData,
                invoice::models::InvoiceDetails,
                invoice::models::Payer,
                invoice::models::Receiver,
                invoice::models::LineItem,
                records::models::PayerRecord,
                records::models::ReceiverRecord,
                records::models::AddressRecord,
                records::models::EmailRecord,
                records::handlers::CreateContactRequest,
                records::handlers::CreateAddressRequest,
                records::handlers::CombinedPayersResponse,
                records::handlers::CombinedReceiversResponse,
                records::handlers::CreatedPayerResponse,
                records::handlers::CreatedReceiverResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Invoice Service", description = "Invoice PDF generation."),
            (name = "Records", description = "Payer/receiver contact records.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let app_config = AppConfig::from_env();
    let bind_addr = (app_config.host.clone(), app_config.port);
    let app_state = web::Data::new(AppState::new(&app_config));

    // The middleware only exports its own registry, so application
    // counters must live in that same registry to show up on /metrics.
    let metrics_registry = prometheus::Registry::new();
    metrics::register(&metrics_registry);
    let prometheus = PrometheusMetricsBuilder::new("invoice_pdf_server")
        .registry(metrics_registry)
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!(
        "Starting server at http://{}:{} ({:?} deployment)",
        bind_addr.0,
        bind_addr.1,
        app_config.deployment
    );

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/invoice")
                            .route(web::post().to(invoice::handlers::generate_invoice)),
                    )
                    .service(
                        web::resource("/payers-combined")
                            .route(web::get().to(records::handlers::get_payers_combined))
                            .route(web::post().to(records::handlers::create_payer_combined)),
                    )
                    .service(
                        web::resource("/receivers-combined")
                            .route(web::get().to(records::handlers::get_receivers_combined))
                            .route(web::post().to(records::handlers::create_receiver_combined)),
                    )
                    .service(
                        web::resource("/payer-addresses")
                            .route(web::get().to(records::handlers::get_payer_addresses))
                            .route(web::post().to(records::handlers::create_payer_address)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
