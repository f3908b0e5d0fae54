pub mod domain;
pub mod error;
pub mod wire;

pub use domain::*;
pub use error::{Result, ValidationError};
pub use wire::*;
