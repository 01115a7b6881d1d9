//! Firestore-backed inventory store for notesync
//!
//! Implements the [`notesync_core::InventoryStore`] trait on top of the
//! Firestore REST API. Documents live in a single collection and are
//! keyed by the record's display name, so lookups and deletes by
//! reconciliation key are direct document operations.

mod auth;
mod codec;
mod config;
mod error;
mod firestore;

pub use auth::MetadataTokenSource;
pub use codec::{fields_to_record, json_to_firestore, firestore_to_json, record_to_fields};
pub use config::FirestoreConfig;
pub use error::{InventoryError, InventoryResult};
pub use firestore::FirestoreStore;
