//! Taskdeck: personal task tracking core.
//!
//! This crate manages task records: creating, listing, fetching, patching
//! and deleting them, deriving a category from each task's text, and
//! tracking priority, status and deadlines.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (JSON file, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, categorization, validation and lifecycle
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
