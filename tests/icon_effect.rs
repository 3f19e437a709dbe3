use bevy::math::Vec2;

use terrain_scan::core::config::IconsConfig;
use terrain_scan::systems::icons::IconEffect;

#[test]
fn effect_is_idle_until_started() {
    let mut icons = IconEffect::default();
    assert!(!icons.is_active());
    assert_eq!(icons.remaining(), 0.0);

    // Idle ticks of any size change nothing.
    icons.tick(100.0);
    assert!(!icons.is_active());
}

#[test]
fn effect_runs_for_its_total_and_expires() {
    let mut icons = IconEffect::default();
    icons.start(5.0, Vec2::new(10.0, 0.0), Vec2::Y);

    assert!(icons.is_active());
    assert_eq!(icons.total_duration(), 5.0);
    assert_eq!(icons.remaining(), 5.0);
    assert_eq!(icons.grid_origin(), Vec2::new(10.0, 0.0));
    assert_eq!(icons.direction(), Vec2::Y);

    icons.tick(2.0);
    assert!(icons.is_active());
    assert_eq!(icons.remaining(), 3.0);

    // The final instant still counts as active.
    icons.tick(3.0);
    assert!(icons.is_active());
    assert_eq!(icons.remaining(), 0.0);

    icons.tick(0.01);
    assert!(!icons.is_active());
    assert_eq!(icons.remaining(), 0.0);
}

#[test]
fn restart_replaces_the_running_effect() {
    let mut icons = IconEffect::default();
    icons.start(5.0, Vec2::ZERO, Vec2::Y);
    icons.tick(4.0);

    icons.start(7.0, Vec2::new(3.0, 4.0), Vec2::X);
    assert!(icons.is_active());
    assert_eq!(icons.remaining(), 7.0);
    assert_eq!(icons.grid_origin(), Vec2::new(3.0, 4.0));
    assert_eq!(icons.direction(), Vec2::X);
}

#[test]
fn total_effect_duration_covers_every_animation_phase() {
    // Small grid with round numbers: icon area 20 x 20, so the farthest
    // icon sits sqrt(20^2 + 10^2) = sqrt(500) from the grid front.
    let config = IconsConfig {
        grid_x: 3,
        grid_y: 3,
        padding: 10.0,
        total_animation_cycles: 2,
        opacity_animation_speed: 10.0,
        fade_intensity_factor: 5.0,
        danger_icon_fadeout_time: 1.0,
        danger_icon_appear_offset: 0.0,
    };

    let max_distance = 500.0_f32.sqrt();
    assert!((config.reveal_animation_duration() - max_distance / 10.0).abs() < 1.0e-5);
    assert!((config.fade_animation_duration() - (max_distance + 5.0) / 10.0).abs() < 1.0e-5);

    // scan + danger fadeout + trailing fade + cycles * (reveal + fade).
    let expected = 3.0
        + 1.0
        + config.fade_animation_duration()
        + 2.0 * (config.reveal_animation_duration() + config.fade_animation_duration());
    assert!((config.total_effect_duration(3.0) - expected).abs() < 1.0e-4);
    assert!((config.total_effect_duration(3.0) - 16.68034).abs() < 1.0e-3);
}

#[test]
fn effect_duration_scales_with_the_grid() {
    let small = IconsConfig {
        grid_x: 10,
        grid_y: 10,
        ..IconsConfig::default()
    };
    let large = IconsConfig::default(); // 75 x 140

    assert!(large.total_effect_duration(3.0) > small.total_effect_duration(3.0));
}
