pub mod auth;
pub mod category;
pub mod photo;
pub mod project;
pub mod public;
pub mod tag;
