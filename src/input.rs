use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::input::{mouse::MouseMotion, keyboard::KeyCode, ButtonInput};

use crate::actions::{PlayerAction, ActionState};
use crate::grass::Trampler;
use crate::setup::MainCamera;

pub const MOVE_SPEED: f32 = 6.0;
pub const LIFT_SPEED: f32 = 3.0;
pub const ROTATE_SPEED: f32 = 0.2;
pub const MAX_INPUT_DT: f32 = 0.05; // never use a dt larger than 50ms

#[derive(Component)]
pub struct CameraOrbit {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(PlayerAction::MoveForward, keys.pressed(KeyCode::KeyW));
    action_state.set(PlayerAction::MoveBackward, keys.pressed(KeyCode::KeyS));
    action_state.set(PlayerAction::MoveLeft, keys.pressed(KeyCode::KeyA));
    action_state.set(PlayerAction::MoveRight, keys.pressed(KeyCode::KeyD));
    action_state.set(PlayerAction::MoveUp, keys.pressed(KeyCode::KeyR));
    action_state.set(PlayerAction::MoveDown, keys.pressed(KeyCode::KeyF));
}

/// Drives the trampling object around the field so the bend under it is
/// visible. WASD moves on XZ (camera-relative), R/F raises/lowers it.
pub fn trampler_controller(
    time: Res<Time>,
    action_state: Res<ActionState>,
    camera: Query<&CameraOrbit, With<MainCamera>>,
    mut query: Query<&mut Transform, With<Trampler>>,
) {
    // 0) Clamp delta
    let mut dt = time.delta_secs();
    if dt > MAX_INPUT_DT {
        dt = MAX_INPUT_DT;
    }

    let Ok(mut tf) = query.single_mut() else { return; };

    // 1) Camera-relative movement on the ground plane
    let yaw = camera.single().map(|o| o.yaw).unwrap_or(0.0);
    let forward = Vec2::new(-yaw.cos(), -yaw.sin());
    let right = Vec2::new(-forward.y, forward.x);

    let mut dir = Vec2::ZERO;
    if action_state.pressed(PlayerAction::MoveForward) { dir += forward; }
    if action_state.pressed(PlayerAction::MoveBackward) { dir -= forward; }
    if action_state.pressed(PlayerAction::MoveLeft) { dir -= right; }
    if action_state.pressed(PlayerAction::MoveRight) { dir += right; }

    if dir != Vec2::ZERO {
        let delta = dir.normalize() * MOVE_SPEED * dt;
        tf.translation.x += delta.x;
        tf.translation.z += delta.y;
    }

    // 2) Vertical lift (exercises the height-offset half of the uniform)
    if action_state.pressed(PlayerAction::MoveUp) {
        tf.translation.y += LIFT_SPEED * dt;
    }
    if action_state.pressed(PlayerAction::MoveDown) {
        tf.translation.y -= LIFT_SPEED * dt;
    }
    tf.translation.y = tf.translation.y.clamp(0.0, 10.0);
}

pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut query: Query<(&mut Transform, &mut CameraOrbit), With<MainCamera>>,
) {
    // 0) Clamp delta
    let mut dt = time.delta_secs();
    if dt > MAX_INPUT_DT {
        dt = MAX_INPUT_DT;
    }

    let Ok((mut tf, mut orbit)) = query.single_mut() else { return; };

    // 1) Zoom
    for ev in scroll_evr.read() {
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.02,
        };
        orbit.radius = (orbit.radius - amount).clamp(2.0, 100.0);
    }

    // 2) Orbit
    if mouse_buttons.pressed(MouseButton::Middle) {
        for ev in motion_evr.read() {
            orbit.yaw += ev.delta.x * ROTATE_SPEED * dt;
            orbit.pitch += ev.delta.y * ROTATE_SPEED * dt;
        }
    }

    orbit.pitch = orbit.pitch.clamp(
        -std::f32::consts::FRAC_PI_2 + 0.01,
        std::f32::consts::FRAC_PI_2 - 0.01,
    );

    // 3) Position camera
    let xz_radius = orbit.radius * orbit.pitch.cos();
    let offset = Vec3::new(
        xz_radius * orbit.yaw.cos(),
        orbit.radius * orbit.pitch.sin(),
        xz_radius * orbit.yaw.sin(),
    );

    tf.translation = orbit.focus + offset;

    // 4) Keep above the field
    if tf.translation.y < 0.5 {
        tf.translation.y = 0.5;
    }

    tf.look_at(orbit.focus, Vec3::Y);
}
