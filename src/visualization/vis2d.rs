//! Bevy 2D viewer and input layer
//!
//! Thin presentation collaborator around the engine: one circle per live
//! body, one engine step per frame, window-title clock, optional centering on
//! the tracked body, and drag-to-spawn. No simulation logic lives here.

use std::collections::HashMap;

use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgb, SPEED_CAP};

#[derive(Component)]
struct BodyMarker(pub u64);

/// In-progress mouse drag: world position (m) and simulated time at press.
#[derive(Resource, Default)]
struct DragState {
    start: Option<(NVec2, f64)>,
}

/// Drags spanning fewer simulated seconds than this are taps, not throws.
const MIN_DRAG_SECONDS: f64 = 100.0;

/// Colors handed to mouse-spawned bodies.
const SPAWN_PALETTE: [Rgb; 5] = [
    [255, 70, 110],
    [50, 100, 255],
    [255, 255, 255],
    [255, 255, 200],
    [80, 180, 255],
];

pub fn run_2d(scenario: Scenario) {
    log::info!(
        "run_2d: starting viewer with {} bodies",
        scenario.engine.bodies().len()
    );

    App::new()
        .insert_resource(scenario)
        .init_resource::<DragState>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "||RED DWARF||".into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_camera_system)
        .add_systems(
            Update,
            (
                spawn_input_system,
                physics_step_system,
                sync_bodies_system,
                caption_system,
            )
                .chain(),
        )
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // One engine step per display tick; merges and their id bookkeeping all
    // happen inside
    scenario.engine.step();
}

/// World-space position (m) of the frame-of-reference center: the tracked
/// body if one is set and alive, else the origin.
fn frame_center(scenario: &Scenario) -> NVec2 {
    scenario
        .engine
        .tracked_id
        .and_then(|id| scenario.engine.find_body(id))
        .map(|b| b.x)
        .unwrap_or_else(NVec2::zeros)
}

/// Keep the entity set in lockstep with the live body set: move what exists,
/// bury what merged away, give new bodies a circle.
fn sync_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &BodyMarker, &mut Transform)>,
) {
    let unit = scenario.engine.params.distance_unit;
    let center = frame_center(&scenario);

    let live: HashMap<u64, usize> = scenario
        .engine
        .bodies()
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id, i))
        .collect();

    let mut drawn = Vec::with_capacity(query.iter().len());
    for (entity, BodyMarker(id), mut transform) in &mut query {
        match live.get(id) {
            Some(&i) => {
                let b = &scenario.engine.bodies()[i];
                transform.translation.x = ((b.x.x - center.x) / unit) as f32;
                transform.translation.y = ((b.x.y - center.y) / unit) as f32;
                drawn.push(*id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for b in scenario.engine.bodies() {
        if drawn.contains(&b.id) {
            continue;
        }
        let radius = (b.display_diameter / 2.0) as f32;
        let x = ((b.x.x - center.x) / unit) as f32;
        let y = ((b.x.y - center.y) / unit) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
                material: materials.add(ColorMaterial::from(Color::rgb_u8(
                    b.color[0], b.color[1], b.color[2],
                ))),
                transform: Transform::from_xyz(x, y, 0.0),
                ..Default::default()
            },
            BodyMarker(b.id),
        ));
    }
}

fn caption_system(scenario: Res<Scenario>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let years = scenario.engine.elapsed() / (365.0 * 24.0 * 3600.0);
    window.title = format!("||RED DWARF|| | Time: {years:.1} calendar years |");
}

/// Press-drag-release spawns a body at the release point, thrown with the
/// drag's average velocity in simulated time, relative to the tracked frame.
fn spawn_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut drag: ResMut<DragState>,
    mut scenario: ResMut<Scenario>,
) {
    let pressed = buttons.just_pressed(MouseButton::Left);
    let released = buttons.just_released(MouseButton::Left);
    if !pressed && !released {
        return;
    }

    let Some(cursor) = cursor_world_position(&windows, &cameras) else {
        return;
    };
    let unit = scenario.engine.params.distance_unit;
    let center = frame_center(&scenario);
    let world = NVec2::new(cursor.x as f64 * unit, cursor.y as f64 * unit) + center;
    let now = scenario.engine.elapsed();

    if pressed {
        drag.start = Some((world, now));
        return;
    }

    let Some((start, t0)) = drag.start.take() else {
        return;
    };
    let elapsed = (now - t0).abs();
    if elapsed <= MIN_DRAG_SECONDS {
        return;
    }

    let mut v = (world - start) / elapsed;
    if let Some(tracked) = scenario
        .engine
        .tracked_id
        .and_then(|id| scenario.engine.find_body(id))
    {
        v += tracked.v;
    }
    if v.x.abs() >= SPEED_CAP || v.y.abs() >= SPEED_CAP {
        log::warn!("drag velocity {v:?} breaks the speed cap, ignoring spawn");
        return;
    }

    let mut rng = rand::thread_rng();
    let mass = rng.gen_range(scenario.spawn.mass_min..scenario.spawn.mass_max);
    let color = SPAWN_PALETTE[rng.gen_range(0..SPAWN_PALETTE.len())];
    let density = scenario.spawn.density;

    scenario.engine.spawn_body(mass, world, v, color, density);
}

fn cursor_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor)
}
