pub mod crud;
pub mod list;
pub mod workflow;

pub use crud::{create, update};
pub use list::{actions, list, read};
pub use workflow::{create_charter, transition};
