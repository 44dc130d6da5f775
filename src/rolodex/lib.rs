//! # Rolodex Architecture
//!
//! Rolodex keeps a personal contact book, named groups of contacts, and a
//! to-do list. It is a library with a CLI client, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Opens stores lazily                                      │
//! │  - Turns printable ids (UUID prefixes, numbers) into ids    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Per-entity logic, returns CmdResult + messages           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - EntityStore<R, B>: records, groups, id assignment        │
//! │  - SnapshotBackend: FsBackend (production), MemBackend      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Store, Two Record Kinds
//!
//! Contacts and tasks go through the same [`store::EntityStore`]; the
//! differences live in the [`model::Record`] impls. Contacts get random UUIDs,
//! tasks get sequential numbers that are never reused.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic per entity
//! - [`store`]: Entity store, snapshot format and backends
//! - [`model`]: `Contact`, `Task`, `Group` and their drafts
//! - [`validation`]: Field rules applied before a draft is stored
//! - [`config`]: Settings in `config.json`
//! - [`logging`]: `flexi_logger` setup for the binary
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
