// Adapters layer: concrete implementations for external systems (model artifact, terminal).

pub mod linear_model;
pub mod terminal;
