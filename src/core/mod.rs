pub mod cache;
pub mod catalog;
pub mod client;
pub mod export;
pub mod favorites;
pub mod filter;
pub mod scoring;
pub mod viewport;

pub use crate::domain::model::{FuelType, PriceSnapshot, Station};
pub use crate::domain::ports::{PriceSource, Storage};
pub use crate::utils::error::Result;
