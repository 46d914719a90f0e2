//! JSON file repository for task records.
//!
//! The whole collection lives in a single pretty-printed JSON array. Every
//! mutation is a read-modify-write of that file, serialized by one lock per
//! repository instance and published by an atomic rename so concurrent
//! readers never observe a torn write.

mod blocking;
mod repository;

pub use repository::JsonFileTaskRepository;
