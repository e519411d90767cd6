use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};

use crate::invoice::models::InvoiceData;
use crate::metrics::PDF_GENERATED_TOTAL;
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Invoice Service",
    post,
    path = "/invoice",
    request_body = InvoiceData,
    responses(
        (status = 200, description = "Rendered PDF document", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_invoice(
    state: web::Data<AppState>,
    body: web::Json<InvoiceData>,
) -> impl Responder {
    let pipeline = state.pipeline.clone();
    let invoice = body.into_inner();

    // The pipeline drives a browser process; run it on the blocking pool
    // so concurrent requests stay independent.
    let result = web::block(move || pipeline.generate(&invoice)).await;

    match result {
        Ok(Ok(artifact)) => {
            PDF_GENERATED_TOTAL.inc();
            HttpResponse::Ok()
                .content_type(artifact.content_type)
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", artifact.filename),
                ))
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .insert_header((header::PRAGMA, "no-cache"))
                .body(artifact.bytes)
        }
        Ok(Err(err)) => {
            log::error!("PDF generation failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::pdf_failure(&err))
        }
        Err(err) => {
            log::error!("PDF generation task was cancelled: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                "PDF generation task was cancelled",
            ))
        }
    }
}
