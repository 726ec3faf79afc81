pub mod client;
pub mod commands;
pub mod models;

#[cfg(test)]
mod testing;
