use bevy::prelude::*;

mod setup;
mod input;
mod actions;
mod grass;

// re-export the bits we actually need in main
use actions::ActionState;
use input::{camera_controller, input_mapping_system, trampler_controller};
use grass::GrassPlugin;

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // your domain plugins
        .add_plugins(GrassPlugin)     // field material + trample uniform relay
        // init resources
        .init_resource::<ActionState>()
        // camera + light
        .add_systems(Startup, setup::setup)
        // input + trampler + camera each frame
        .add_systems(
            Update,
            (input_mapping_system, trampler_controller, camera_controller)
        )
        .run();
}
