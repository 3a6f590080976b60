// src/grass/material.rs

use bevy::pbr::Material;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};

/// Custom grass material. The `trample` uniform is the only per-frame input;
/// everything else is set once when the field spawns.
///
/// Layout of `trample`: (x, y, z) = world-space trample center (Y already
/// includes the configured height offset), w = trample radius in meters.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GrassFieldMaterial {
    #[uniform(0)]
    pub trample: Vec4,
    #[uniform(1)]
    pub base_color: LinearRgba,
    #[uniform(2)]
    pub tip_color: LinearRgba,
}

impl Default for GrassFieldMaterial {
    fn default() -> Self {
        Self {
            // Zero radius: no blade bends until a source pushes a real vector.
            trample: Vec4::ZERO,
            base_color: LinearRgba::rgb(0.05, 0.22, 0.03),
            tip_color: LinearRgba::rgb(0.35, 0.65, 0.18),
        }
    }
}

impl Material for GrassFieldMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/grass_field.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/grass_field.wgsl".into()
    }
}
