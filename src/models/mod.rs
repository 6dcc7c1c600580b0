pub mod committee;
pub mod dashboard;
pub mod document;
pub mod project;
pub mod value_list;
pub mod workflow;
