pub mod controller;
pub mod providers;
pub mod service;
