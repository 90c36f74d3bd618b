//! Directed diagram model and its DOT serialization.

pub mod dot;
pub mod model;

pub use model::{Edge, Graph, Node};
