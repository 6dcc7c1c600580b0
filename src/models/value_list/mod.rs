pub mod queries;
pub mod types;
pub mod validation;

pub use queries::*;
pub use types::*;
pub use validation::validate_change;
