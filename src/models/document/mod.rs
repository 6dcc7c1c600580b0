pub mod queries;
pub mod types;
pub mod validation;

pub use queries::*;
pub use types::*;
