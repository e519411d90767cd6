#[actix_web::main]
async fn main() -> std::io::Result<()> {
    invoice_pdf_server::run().await
}
