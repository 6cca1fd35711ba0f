//! Flutter-facing bridge crate for ChromaTap core.

pub mod api;
