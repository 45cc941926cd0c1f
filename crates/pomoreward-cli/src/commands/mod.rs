pub mod config;
pub mod demo;
pub mod rewards;
pub mod settings;
pub mod timer;
