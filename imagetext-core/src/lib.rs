pub mod config;
pub mod generator;
pub mod samples;
pub mod stage;
pub mod text;
pub mod types;

pub use config::*;
pub use generator::*;
pub use samples::*;
pub use stage::*;
pub use text::*;
pub use types::*;
