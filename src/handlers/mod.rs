pub mod auth;
pub mod library;
pub mod novel;
