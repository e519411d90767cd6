//! Invoice document model and the PDF-generation endpoint.

pub mod handlers;
pub mod models;
