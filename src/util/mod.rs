//! Process-wide helpers shared by the binary and the library

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
