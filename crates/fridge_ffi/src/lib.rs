//! Flutter-facing bindings for the fridge inventory core.

pub mod api;
