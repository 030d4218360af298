pub mod bus;
pub mod event;
pub mod execution;
pub mod machine;
pub mod repository;
pub mod subscribers;
pub mod types;

#[cfg(test)]
mod tests;
