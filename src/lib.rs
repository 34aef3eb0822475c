pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
