//! Browser-facing Leptos components.

pub mod force_graph;
