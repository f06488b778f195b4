pub mod config_store;
pub mod files;
pub mod uploads;
