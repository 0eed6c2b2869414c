//! Flat-file persistence for registrations and inquiries.
//!
//! - `codec`: schema-checked conversion between CSV bytes and records.
//! - `record_store`: the single authority for reading and mutating one file.
//!   Mutations hold a per-store lock for the whole read-modify-write and
//!   rewrites are atomic (temp file + rename).
//! - `submission`: stamping of freshly submitted records.

pub mod codec;
pub mod record_store;
pub mod submission;

pub use record_store::{RecordStore, Snapshot};
