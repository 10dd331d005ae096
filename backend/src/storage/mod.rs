pub mod kv;
pub mod traits;

pub use traits::*;
