pub mod binder_config;
pub mod validation;

pub use binder_config::*;
pub use validation::*;
