pub mod config;
pub mod drift;
pub mod input;
