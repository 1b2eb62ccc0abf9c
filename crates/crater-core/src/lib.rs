pub mod catalog;
pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod geo;
pub mod io;
pub mod pipeline;
pub mod preprocess;
pub mod vision;
