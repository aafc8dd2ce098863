pub mod catalog;
pub mod config;
pub mod error;
pub mod eval;
pub mod recommend;
pub mod server;

pub use catalog::{Catalog, CatalogItem};
pub use config::Config;
pub use error::{Result, TestrecError};
pub use recommend::{recommend, FALLBACK_COUNT, MAX_RECOMMENDATIONS};
