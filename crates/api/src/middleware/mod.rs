//! Request extractors guarding the admin surface.
//!
//! - [`auth::AdminSession`] -- a valid Bearer token whose session is still active.

pub mod auth;
