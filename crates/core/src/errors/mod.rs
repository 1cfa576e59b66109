pub mod core;

pub use self::core::{BinderError, CreationError, PropertyProblem, StartupError};
