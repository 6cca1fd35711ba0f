//! Persisted document model for projects and palettes.
//!
//! # Responsibility
//! - Define the canonical Project/Palette shapes written to disk.
//! - Provide id generation and timestamp helpers shared by the store.
//!
//! # Invariants
//! - Ids are generated once and never change.
//! - A project exclusively owns its palettes; deleting it deletes them.
//! - Colors are opaque strings here; the model never interprets them.

pub mod palette;
pub mod stamp;
