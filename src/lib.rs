pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod views;

pub use db::Store;
pub use error::NovellaError;
pub use router::{NovellaState, novella_router};
