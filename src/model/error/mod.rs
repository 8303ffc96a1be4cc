pub mod namespace_errors;
pub mod tag_errors;
