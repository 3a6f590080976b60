// src/grass/settings.rs
//! RON-backed field settings + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{HEIGHT_OFFSET_RANGE, RADIUS_RANGE};

// ---------- Settings (data form) ----------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrassSettingsDef {
    /// Trample radius in meters (0..=10, clamped at load).
    #[serde(default = "default_radius")]
    pub trample_radius: f32,

    /// Added to the source's Y before it reaches the shader (-2..=5, clamped at load).
    #[serde(default = "default_height_offset")]
    pub trample_height_offset: f32,

    /// Half-extent of the square field in meters.
    #[serde(default = "default_field_extent")]
    pub field_extent: f32,

    /// Grid cell size for blade placement, meters.
    #[serde(default = "default_blade_cell")]
    pub blade_cell: f32,

    /// Fraction of a cell each blade may jitter (0..=0.5).
    #[serde(default = "default_jitter")]
    pub jitter: f32,

    /// Reshuffles blade placement.
    #[serde(default)]
    pub seed: u64,
}

fn default_radius() -> f32 {
    2.0
}
fn default_height_offset() -> f32 {
    0.0
}
fn default_field_extent() -> f32 {
    12.0
}
fn default_blade_cell() -> f32 {
    0.35
}
fn default_jitter() -> f32 {
    0.35
}

// ---------- Runtime settings asset ----------

#[derive(Asset, TypePath, Clone, Debug)]
pub struct GrassSettings {
    pub trample_radius: f32,
    pub trample_height_offset: f32,
    pub field_extent: f32,
    pub blade_cell: f32,
    pub jitter: f32,
    pub seed: u64,
}

impl GrassSettings {
    /// Clamp everything the configuration surface constrains.
    pub fn from_def(def: GrassSettingsDef) -> Self {
        Self {
            trample_radius: def.trample_radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1),
            trample_height_offset: def
                .trample_height_offset
                .clamp(HEIGHT_OFFSET_RANGE.0, HEIGHT_OFFSET_RANGE.1),
            field_extent: def.field_extent.max(1.0),
            blade_cell: def.blade_cell.max(0.05),
            jitter: def.jitter.clamp(0.0, 0.5),
            seed: def.seed,
        }
    }
}

/// Handle to the loaded settings asset, inserted at startup.
#[derive(Resource)]
pub struct GrassSettingsHandle(pub Handle<GrassSettings>);

// ---------- Asset loader for `.grass.ron` ----------

#[derive(Default)]
pub struct GrassSettingsLoader;

impl AssetLoader for GrassSettingsLoader {
    type Asset = GrassSettings;
    type Settings = ();
    type Error = GrassSettingsLoadError;

    fn extensions(&self) -> &[&str] {
        &["grass.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let def: GrassSettingsDef =
            ron::de::from_bytes(&bytes).map_err(|e| GrassSettingsLoadError::Ron(e.to_string()))?;
        Ok(GrassSettings::from_def(def))
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum GrassSettingsLoadError {
    #[error("I/O while reading grass settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let def: GrassSettingsDef = ron::de::from_str("()").unwrap();
        assert_eq!(def.trample_radius, 2.0);
        assert_eq!(def.trample_height_offset, 0.0);
        assert_eq!(def.seed, 0);
    }

    #[test]
    fn out_of_range_trample_values_clamp_at_load() {
        let def: GrassSettingsDef =
            ron::de::from_str("(trample_radius: 15.0, trample_height_offset: -5.0)").unwrap();
        let settings = GrassSettings::from_def(def);
        assert_eq!(settings.trample_radius, 10.0);
        assert_eq!(settings.trample_height_offset, -2.0);
    }

    #[test]
    fn in_range_values_survive_load() {
        let def: GrassSettingsDef = ron::de::from_str(
            "(trample_radius: 4.0, trample_height_offset: 0.5, field_extent: 20.0, seed: 7)",
        )
        .unwrap();
        let settings = GrassSettings::from_def(def);
        assert_eq!(settings.trample_radius, 4.0);
        assert_eq!(settings.trample_height_offset, 0.5);
        assert_eq!(settings.field_extent, 20.0);
        assert_eq!(settings.seed, 7);
    }
}
