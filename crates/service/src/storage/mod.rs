//! Storage abstractions for service layer
//!
//! Contains the file-backed collection store used as the persistence
//! adapter behind record stores.

pub mod json_file_store;
