pub mod config;
pub mod resolve;


pub use config::Settings;
pub use resolve::Config;
