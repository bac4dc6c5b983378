pub mod capability;
pub mod edit;
pub mod library;
pub mod loader;
pub mod notice;
pub mod page;
pub mod session;
