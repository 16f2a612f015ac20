//! Typed row models and request DTOs, one module per table.

pub mod admin;
pub mod category;
pub mod photo;
pub mod project;
pub mod tag;
