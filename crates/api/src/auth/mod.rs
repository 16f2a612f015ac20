//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing of the shared admin password.
//! - [`jwt`] -- access tokens whose `jti` ties them to an admin session.

pub mod jwt;
pub mod password;
