use terrain_scan::core::config::{FootprintConfig, IconsConfig, ScannerConfig, TerrainScanConfig};

#[test]
fn default_config_is_valid() {
    assert!(TerrainScanConfig::default().validate().is_ok());
}

#[test]
fn scanner_bounds_are_enforced() {
    let rejects = |tweak: fn(&mut ScannerConfig)| {
        let mut config = ScannerConfig::default();
        tweak(&mut config);
        config.validate().is_err()
    };

    assert!(rejects(|c| c.spawn_duration = 0.0));
    assert!(rejects(|c| c.prewarm_duration = -0.1));
    assert!(rejects(|c| c.expansion_duration = 0.0));
    assert!(rejects(|c| c.arc_angle = 0.0));
    assert!(rejects(|c| c.arc_angle = 361.0));
    // The expansion speed ramp divides by
    // (expansion_duration - max_speed_duration).
    assert!(rejects(|c| c.max_speed_duration = c.expansion_duration));
    assert!(rejects(|c| c.max_speed_duration = 0.0));
    assert!(rejects(|c| c.fadeout_duration = c.expansion_duration + 1.0));
    assert!(rejects(|c| c.dark_circle_fadeout_duration = 0.0));
    assert!(rejects(|c| c.initial_speed = -1.0));
    assert!(rejects(|c| c.final_speed = -1.0));
    assert!(rejects(|c| c.initial_range = -1.0));
    assert!(rejects(|c| c.spawn_final_opacity = 1.5));
    assert!(rejects(|c| c.dark_circle_size = 0.0));

    assert!(ScannerConfig { arc_angle: 360.0, ..ScannerConfig::default() }
        .validate()
        .is_ok());
}

#[test]
fn footprint_bounds_are_enforced() {
    let rejects = |tweak: fn(&mut FootprintConfig)| {
        let mut config = FootprintConfig::default();
        tweak(&mut config);
        config.validate().is_err()
    };

    assert!(rejects(|c| c.max_footprints = 0));
    assert!(rejects(|c| c.base_lifetime = 0.0));
    assert!(rejects(|c| c.fade_time = -1.0));
    assert!(rejects(|c| c.highlight_fade_time = -1.0));
    assert!(rejects(|c| c.decal_size.x = 0.0));
    assert!(rejects(|c| c.stride_length = 0.0));
}

#[test]
fn icon_bounds_are_enforced() {
    let rejects = |tweak: fn(&mut IconsConfig)| {
        let mut config = IconsConfig::default();
        tweak(&mut config);
        config.validate().is_err()
    };

    assert!(rejects(|c| c.grid_x = 1));
    assert!(rejects(|c| c.grid_y = 1));
    assert!(rejects(|c| c.padding = 0.0));
    assert!(rejects(|c| c.opacity_animation_speed = 0.0));
    assert!(rejects(|c| c.danger_icon_appear_offset = -1.0));
}

#[test]
fn invalid_config_falls_back_to_defaults_wholesale() {
    let bad = TerrainScanConfig {
        scanner: ScannerConfig {
            arc_angle: -10.0,
            ..ScannerConfig::default()
        },
        footprints: FootprintConfig {
            base_lifetime: 99.0,
            ..FootprintConfig::default()
        },
        ..TerrainScanConfig::default()
    };

    let fixed = bad.validated();
    assert!(fixed.validate().is_ok());
    assert_eq!(fixed.scanner.arc_angle, ScannerConfig::default().arc_angle);
    // The whole file is rejected, not patched: the valid footprint section
    // reverts too.
    assert_eq!(
        fixed.footprints.base_lifetime,
        FootprintConfig::default().base_lifetime
    );
}
