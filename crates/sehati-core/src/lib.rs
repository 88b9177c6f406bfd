//! sehati-core
//!
//! Pure domain types and draft storage key conventions.
//! No scoring tables and no I/O; this is the shared vocabulary of the
//! assessment workspace, exported to TypeScript for the web front end.

pub mod draft_keys;
pub mod error;
pub mod models;
