// src/systems/movement.rs - Player movement and footstep cadence
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::core::*;

const PLAYER_Z: f32 = 10.0;
pub const PLAYER_SPEED: f32 = 260.0;

pub fn setup_player(mut commands: Commands) {
    commands.spawn((
        Player,
        Facing::default(),
        Stride::default(),
        Sprite {
            color: Color::srgb(0.9, 0.85, 0.6),
            custom_size: Some(Vec2::splat(18.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, PLAYER_Z),
        InputManagerBundle::with_map(
            InputMap::default()
                .with_dual_axis(PlayerAction::Move, VirtualDPad::wasd())
                .with(PlayerAction::Scan, KeyCode::KeyE),
        ),
    ));
}

pub fn player_movement(
    mut footsteps: EventWriter<FootstepEvent>,
    mut player: Query<
        (&ActionState<PlayerAction>, &mut Transform, &mut Facing, &mut Stride),
        With<Player>,
    >,
    config: Res<TerrainScanConfig>,
    time: Res<Time>,
) {
    let Ok((action_state, mut transform, mut facing, mut stride)) = player.single_mut() else {
        return;
    };

    let direction = action_state.axis_pair(&PlayerAction::Move).normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }

    facing.0 = direction;
    let step = direction * PLAYER_SPEED * time.delta_secs();
    transform.translation += step.extend(0.0);

    // One footstep per stride length, feet alternating. Stands in for the
    // animation-driven foot plants of a fully rigged character.
    stride.traveled += step.length();
    while stride.traveled >= config.footprints.stride_length {
        stride.traveled -= config.footprints.stride_length;
        footsteps.write(FootstepEvent {
            side: stride.next_side,
        });
        stride.next_side = stride.next_side.other();
    }
}
