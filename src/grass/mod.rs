// src/grass/mod.rs

// these sub‐modules stay private
mod components;
mod material;
mod plugin;
mod settings;
mod systems;

// re-export what callers actually need:
pub use components::{TrampleSource, Trampler};
pub use material::GrassFieldMaterial;
pub use plugin::GrassPlugin;
