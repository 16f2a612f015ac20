//! Domain logic for the Folio portfolio backend.
//!
//! Everything here is pure and synchronous: no database, no HTTP. The `db`
//! and `api` crates load rows, hand them to these types, and persist what
//! comes back.

pub mod catalog;
pub mod error;
pub mod gallery;
pub mod ordering;
pub mod types;
