pub mod config;
pub mod hub;
pub mod navigation;
pub mod viewer;

pub use config::*;
pub use hub::*;
pub use navigation::*;
pub use viewer::*;
