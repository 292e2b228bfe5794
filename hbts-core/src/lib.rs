pub mod config;
pub mod convert;
pub mod error;
pub mod file_util;
pub mod tracing_ext;
