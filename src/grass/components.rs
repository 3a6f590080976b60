// src/grass/components.rs
//! Trample source component + the vector it pushes into the shader.

use bevy::prelude::*;

use super::material::GrassFieldMaterial;

// ---------- Configuration ranges ----------

/// Trample radius is clamped into this range at configuration time.
pub const RADIUS_RANGE: (f32, f32) = (0.0, 10.0);
/// Height offset is clamped into this range at configuration time.
pub const HEIGHT_OFFSET_RANGE: (f32, f32) = (-2.0, 5.0);

// ---------- Component ----------

/// Attached to whatever walks over the grass. Every frame its world position
/// (plus `height_offset` on Y) and `radius` are pushed into the referenced
/// field material's `trample` uniform.
///
/// `material == None` means the source is disabled: the per-frame push is a
/// silent no-op, not an error.
#[derive(Component)]
pub struct TrampleSource {
    pub material: Option<Handle<GrassFieldMaterial>>,
    radius: f32,
    height_offset: f32,
}

impl TrampleSource {
    pub fn new(material: Option<Handle<GrassFieldMaterial>>, radius: f32, height_offset: f32) -> Self {
        Self {
            material,
            radius: radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1),
            height_offset: height_offset.clamp(HEIGHT_OFFSET_RANGE.0, HEIGHT_OFFSET_RANGE.1),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
    }

    pub fn height_offset(&self) -> f32 {
        self.height_offset
    }

    pub fn set_height_offset(&mut self, height_offset: f32) {
        self.height_offset = height_offset.clamp(HEIGHT_OFFSET_RANGE.0, HEIGHT_OFFSET_RANGE.1);
    }
}

/// Marks the demo's movable trampling object.
#[derive(Component)]
pub struct Trampler;

/// The uniform layout the grass shader expects: XZ is the trample center,
/// Y carries the height offset baked in, W is the radius.
pub fn trample_vector(position: Vec3, height_offset: f32, radius: f32) -> Vec4 {
    Vec4::new(position.x, position.y + height_offset, position.z, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_layout_is_xz_center_offset_y_radius_w() {
        let v = trample_vector(Vec3::new(1.0, 2.0, 3.0), 0.5, 4.0);
        assert_eq!(v, Vec4::new(1.0, 2.5, 3.0, 4.0));
    }

    #[test]
    fn constructor_clamps_radius_and_offset() {
        let src = TrampleSource::new(None, 15.0, -5.0);
        assert_eq!(src.radius(), 10.0);
        assert_eq!(src.height_offset(), -2.0);
    }

    #[test]
    fn setters_clamp_into_declared_ranges() {
        let mut src = TrampleSource::new(None, 1.0, 0.0);

        src.set_radius(-3.0);
        assert_eq!(src.radius(), 0.0);
        src.set_radius(10.0);
        assert_eq!(src.radius(), 10.0);

        src.set_height_offset(7.5);
        assert_eq!(src.height_offset(), 5.0);
        src.set_height_offset(-2.0);
        assert_eq!(src.height_offset(), -2.0);
    }

    #[test]
    fn in_range_values_pass_through_unchanged() {
        let src = TrampleSource::new(None, 4.0, 0.5);
        assert_eq!(src.radius(), 4.0);
        assert_eq!(src.height_offset(), 0.5);
    }
}
