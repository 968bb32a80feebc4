//! In-memory, per-user to-do storage.
//!
//! # Overview
//! `TodoStore` maps a user identifier to that user's ordered list of todos.
//! Request bodies arrive as untyped JSON and are validated here before a
//! typed `Todo` is ever constructed, so the HTTP layer stays a thin shell.
//!
//! # Design
//! - The store is a plain owned value with `&self` reads and `&mut self`
//!   writes. It never locks; the caller decides how to serialize access.
//! - No I/O and no async. Everything is deterministic apart from id
//!   generation and the wall clock.
//! - Errors carry the exact client-facing message in their `Display`.

pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{StoreError, ValidationError};
pub use store::TodoStore;
pub use types::{Todo, DEFAULT_STATUS};
pub use validate::{NewTodo, TodoPatch};
