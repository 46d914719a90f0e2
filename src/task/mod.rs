//! Task record lifecycle management.
//!
//! Tasks are created, listed, fetched, patched and deleted through
//! [`services::TaskLifecycleService`]. Each task is categorized from its text
//! unless the client names a category, and its `finished_at` timestamp
//! tracks whether it is done. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
