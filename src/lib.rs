pub mod config;
pub mod decision;
pub mod errors;
pub mod initialization;
pub mod manager_bmkg;
pub mod manager_storage;
pub mod models;
pub mod worker;

#[cfg(test)]
mod test_support;
