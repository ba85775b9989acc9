//! Flutter-facing bindings for WordKeeper core.

pub mod api;
