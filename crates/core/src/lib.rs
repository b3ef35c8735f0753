//! Crop valuation engine. Keep this crate free of IO and platform concerns.

pub mod catalog;
pub mod config;
pub mod error;
pub mod estimate;
pub mod events;
pub mod keys;
pub mod price;
pub mod resolver;
pub mod selection;
pub mod valuation;

#[cfg(test)]
mod test_support;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use estimate::*;
pub use events::*;
pub use keys::*;
pub use price::*;
pub use resolver::*;
pub use selection::*;
pub use valuation::*;
