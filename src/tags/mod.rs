pub mod counter;
pub mod models;
pub mod policy;
pub mod repository;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

// make it easier to just use models
pub use models::*;
