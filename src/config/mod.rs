pub mod cli;
pub mod loader;
pub mod settings;
