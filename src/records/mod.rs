//! Payer/receiver contact records the authoring UI uses to pre-fill forms.
//!
//! Simple keyed create/find operations scoped to the owning user; the
//! PDF pipeline itself never touches this module.

pub mod handlers;
pub mod models;
pub mod store;

pub use store::RecordStore;
