pub mod config;
pub mod error;
pub mod types;

pub use config::TractionConfig;
pub use error::{Result, TractionError};
pub use types::*;
