//! Adapter implementations for task record storage.

pub mod json_file;
pub mod memory;
