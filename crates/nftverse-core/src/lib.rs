pub mod config;
pub mod error;
pub mod landing;
pub mod market;

pub use config::{AppConfig, StoreBackend};
pub use error::{Error, Result};
