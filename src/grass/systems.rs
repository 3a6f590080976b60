// src/grass/systems.rs

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::components::{trample_vector, TrampleSource, Trampler};
use super::material::GrassFieldMaterial;
use super::settings::{GrassSettings, GrassSettingsHandle};

/// Kick off the settings load; the field spawns once the asset is in.
pub fn load_grass_settings(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle: Handle<GrassSettings> = asset_server.load("field.grass.ron");
    commands.insert_resource(GrassSettingsHandle(handle));
}

/// Spawns the grass field + trampler as soon as the settings asset is ready.
/// Runs every frame but bails until then; `spawned` keeps it one-shot.
pub fn spawn_field_when_ready(
    mut commands: Commands,
    mut spawned: Local<bool>,
    settings_assets: Res<Assets<GrassSettings>>,
    handle: Res<GrassSettingsHandle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut grass_materials: ResMut<Assets<GrassFieldMaterial>>,
    mut std_materials: ResMut<Assets<StandardMaterial>>,
) {
    if *spawned {
        return;
    }
    let Some(settings) = settings_assets.get(&handle.0) else { return };
    *spawned = true;

    // 1) One shared material for the whole field; every blade's bend reads
    //    the same trample uniform.
    let field_material = grass_materials.add(GrassFieldMaterial::default());

    // 2) Ground slab underneath, same trick as a water plane: a thin cuboid.
    let extent = settings.field_extent;
    let ground_mesh = meshes.add(Mesh::from(Cuboid::new(extent * 2.0, 0.05, extent * 2.0)));
    let ground_mat = std_materials.add(StandardMaterial {
        base_color: Color::srgb(0.13, 0.1, 0.06),
        perceptual_roughness: 1.0,
        ..Default::default()
    });
    commands.spawn((
        Mesh3d(ground_mesh),
        MeshMaterial3d(ground_mat),
        Transform::from_translation(Vec3::new(0.0, -0.025, 0.0)),
        GlobalTransform::default(),
        Name::new("Ground"),
    ));

    // 3) Blades on a jittered grid, deterministic per seed.
    let blade_mesh = meshes.add(Mesh::from(Cuboid::new(0.06, 1.0, 0.02)));
    let cell = settings.blade_cell;
    let jitter = settings.jitter;
    let n = ((extent * 2.0) / cell).floor().max(1.0) as i32;

    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed ^ 0x5157_4152_4447_5353u64);
    let mut count = 0usize;

    for j in 0..n {
        for i in 0..n {
            // Cell center
            let cx = -extent + (i as f32 + 0.5) * cell;
            let cz = -extent + (j as f32 + 0.5) * cell;

            // Jitter
            let jx = (rng.random::<f32>() - 0.5) * 2.0 * (jitter * cell);
            let jz = (rng.random::<f32>() - 0.5) * 2.0 * (jitter * cell);

            let rot_y = rng.random_range(0.0..std::f32::consts::TAU);
            let height = rng.random_range(0.7..1.2);

            commands.spawn((
                Mesh3d(blade_mesh.clone()),
                MeshMaterial3d(field_material.clone()),
                Transform {
                    translation: Vec3::new(cx + jx, height * 0.5, cz + jz),
                    rotation: Quat::from_rotation_y(rot_y),
                    scale: Vec3::new(1.0, height, 1.0),
                },
                GlobalTransform::default(),
            ));
            count += 1;
        }
    }

    // 4) The trampler itself: a sphere carrying the TrampleSource that
    //    references the shared field material.
    let trampler_mesh = meshes.add(Mesh::from(Sphere::new(0.5)));
    let trampler_mat = std_materials.add(StandardMaterial {
        base_color: Color::srgb_u8(124, 144, 255),
        ..Default::default()
    });
    commands.spawn((
        Mesh3d(trampler_mesh),
        MeshMaterial3d(trampler_mat),
        Transform::from_xyz(0.0, 0.5, 0.0),
        GlobalTransform::default(),
        Trampler,
        TrampleSource::new(
            Some(field_material),
            settings.trample_radius,
            settings.trample_height_offset,
        ),
        Name::new("Trampler"),
    ));

    info!(
        "grass: field spawned, {} blades over ±{:.1}m, trample radius {:.1}",
        count, extent, settings.trample_radius
    );
}

/// The per-frame relay: world position (plus height offset) and radius go
/// into the referenced material's trample uniform. A source without a
/// material (or whose material asset is gone) is skipped silently.
pub fn push_trample_uniform(
    sources: Query<(&TrampleSource, &GlobalTransform)>,
    mut materials: ResMut<Assets<GrassFieldMaterial>>,
) {
    for (source, transform) in &sources {
        let Some(handle) = &source.material else { continue };
        let Some(material) = materials.get_mut(handle) else { continue };

        material.trample =
            trample_vector(transform.translation(), source.height_offset(), source.radius());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay_app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<GrassFieldMaterial>>();
        app.add_systems(Update, push_trample_uniform);
        app
    }

    fn add_material(app: &mut App) -> Handle<GrassFieldMaterial> {
        app.world_mut()
            .resource_mut::<Assets<GrassFieldMaterial>>()
            .add(GrassFieldMaterial::default())
    }

    fn trample_of(app: &App, handle: &Handle<GrassFieldMaterial>) -> Vec4 {
        app.world()
            .resource::<Assets<GrassFieldMaterial>>()
            .get(handle)
            .unwrap()
            .trample
    }

    #[test]
    fn writes_position_offset_and_radius() {
        let mut app = relay_app();
        let handle = add_material(&mut app);

        app.world_mut().spawn((
            TrampleSource::new(Some(handle.clone()), 4.0, 0.5),
            GlobalTransform::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        ));

        app.update();

        assert_eq!(trample_of(&app, &handle), Vec4::new(1.0, 2.5, 3.0, 4.0));
    }

    #[test]
    fn tracks_the_source_as_it_moves() {
        let mut app = relay_app();
        let handle = add_material(&mut app);

        let entity = app
            .world_mut()
            .spawn((
                TrampleSource::new(Some(handle.clone()), 2.0, 0.0),
                GlobalTransform::from_translation(Vec3::ZERO),
            ))
            .id();

        app.update();
        assert_eq!(trample_of(&app, &handle), Vec4::new(0.0, 0.0, 0.0, 2.0));

        *app.world_mut().get_mut::<GlobalTransform>(entity).unwrap() =
            GlobalTransform::from_translation(Vec3::new(-3.0, 1.0, 8.0));

        app.update();
        assert_eq!(trample_of(&app, &handle), Vec4::new(-3.0, 1.0, 8.0, 2.0));
    }

    #[test]
    fn no_material_means_no_writes() {
        let mut app = relay_app();
        let handle = add_material(&mut app);

        // Sentinel value that a write would destroy.
        let sentinel = Vec4::new(9.0, 9.0, 9.0, 9.0);
        app.world_mut()
            .resource_mut::<Assets<GrassFieldMaterial>>()
            .get_mut(&handle)
            .unwrap()
            .trample = sentinel;

        app.world_mut().spawn((
            TrampleSource::new(None, 4.0, 0.5),
            GlobalTransform::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        ));

        for _ in 0..10 {
            app.update();
        }

        assert_eq!(trample_of(&app, &handle), sentinel);
    }

    #[test]
    fn dangling_material_handle_is_skipped() {
        let mut app = relay_app();
        let handle = add_material(&mut app);

        app.world_mut()
            .resource_mut::<Assets<GrassFieldMaterial>>()
            .remove(&handle);

        app.world_mut().spawn((
            TrampleSource::new(Some(handle), 4.0, 0.5),
            GlobalTransform::from_translation(Vec3::ZERO),
        ));

        // Must not panic, must not do anything observable.
        app.update();
    }
}
