use bevy::prelude::*;

use crate::grass::material::GrassFieldMaterial;
use crate::grass::settings::{GrassSettings, GrassSettingsLoader};
use crate::grass::systems::{load_grass_settings, push_trample_uniform, spawn_field_when_ready};

pub struct GrassPlugin;

impl Plugin for GrassPlugin {
    fn build(&self, app: &mut App) {
        app
            // Custom field material (render-world plumbing comes with it)
            .add_plugins(MaterialPlugin::<GrassFieldMaterial>::default())

            // Settings asset + RON loader
            .init_asset::<GrassSettings>()
            .register_asset_loader(GrassSettingsLoader)

            // Request the settings file once at startup
            .add_systems(Startup, load_grass_settings)

            // On Update:
            // 1. spawn the field once settings are in
            .add_systems(Update, spawn_field_when_ready)
            // 2. then push the trample uniform for this frame
            .add_systems(Update, push_trample_uniform.after(spawn_field_when_ready));
    }
}
