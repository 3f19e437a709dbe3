use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use leafwing_input_manager::prelude::*;

use terrain_scan::core::*;
use terrain_scan::systems::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terrain Scan".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
        .add_plugins(InputManagerPlugin::<PlayerAction>::default())
        .add_plugins(ScanSchedulePlugin)
        .insert_resource(TerrainScanConfig::load())
        .init_resource::<ScannerState>()
        .init_resource::<FootprintPool>()
        .init_resource::<IconEffect>()
        .init_resource::<MaterialParams>()
        .add_event::<ScanRequestedEvent>()
        .add_event::<ScanStartedEvent>()
        .add_event::<FootstepEvent>()
        .add_systems(Startup, (
            setup_camera,
            setup_player,
            setup_terrain,
            setup_scan_material_params,
        ))
        // The pulse engine must finish its frame update before anything
        // downstream reads it, so the simulation chain is explicit: input,
        // lifecycle start, scanner tick, then the icon effect and the
        // footprint pool. Presentation reads the same state and runs in a
        // set ordered after the whole chain.
        .add_systems(Update, (
            handle_scan_input,
            player_movement,
            begin_scan_lifecycle,
            tick_scanner,
            tick_icon_effect,
            start_icon_effect,
            handle_footsteps,
            reclassify_on_scan,
            age_footprints,
        ).chain().in_set(ScanSet::Simulate))
        .add_systems(Update, (
            draw_scan_pulse,
            draw_terrain_icons,
            fade_footprint_decals,
            despawn_marked_entities,
        ).in_set(ScanSet::Present))
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
