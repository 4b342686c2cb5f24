pub mod calendar;
pub mod cli;
pub mod errors;
pub mod fixtures;
pub mod flex;
pub mod index;
pub mod mock;
pub mod provider;
pub mod render;
pub mod state;
pub mod stats;
pub mod types;
pub mod utils;
