pub mod catalog;
pub mod config;
pub mod detect;
pub mod lookup;
pub mod preprocess;
