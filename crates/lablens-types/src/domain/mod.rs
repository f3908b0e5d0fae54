pub mod filter;
pub mod matrix;
pub mod pair;
pub mod record;

pub use filter::*;
pub use matrix::*;
pub use pair::*;
pub use record::*;
