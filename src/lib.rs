pub mod config;
pub mod logging;
pub mod model;
pub mod namespaces;
pub mod public_id;
pub mod repository;
pub mod tags;
pub mod threads;
#[cfg(test)]
mod test;
