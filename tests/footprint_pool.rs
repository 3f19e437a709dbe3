use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::{Vec2, Vec3};
use bevy::prelude::World;

use terrain_scan::core::config::FootprintConfig;
use terrain_scan::core::events::FootstepSide;
use terrain_scan::systems::footprints::{
    compute_lifetime, footprint_orientation, reclassify_record, FootprintPool, FootprintRecord,
    ReclassifyOutcome,
};

fn record(world: &mut World, lifetime: f32, highlighted: bool) -> FootprintRecord {
    FootprintRecord {
        location: Vec3::ZERO,
        orientation: 0.0,
        side: FootstepSide::Left,
        age: 0.0,
        lifetime,
        is_highlighted: highlighted,
        decal: world.spawn_empty().id(),
    }
}

#[test]
fn pool_never_exceeds_capacity() {
    let mut world = World::new();
    let mut pool = FootprintPool::default();
    let capacity = 99;

    let mut decals = Vec::new();
    for _ in 0..capacity {
        let r = record(&mut world, 10.0, false);
        decals.push(r.decal);
        assert_eq!(pool.push(r, capacity), None);
    }
    assert_eq!(pool.len(), capacity);

    // The hundredth footstep evicts the very first decal.
    let overflow = record(&mut world, 10.0, false);
    let newest = overflow.decal;
    let evicted = pool.push(overflow, capacity);
    assert_eq!(evicted, Some(decals[0]));
    assert_eq!(pool.len(), capacity);

    // Insertion order survives the eviction, oldest first.
    assert_eq!(pool.records()[0].decal, decals[1]);
    assert_eq!(pool.records()[capacity - 1].decal, newest);
    assert!(pool.records().iter().all(|r| r.decal != decals[0]));
}

#[test]
fn aging_releases_each_decal_exactly_once() {
    let mut world = World::new();
    let mut pool = FootprintPool::default();

    let short = record(&mut world, 1.0, false);
    let long = record(&mut world, 2.0, false);
    let short_decal = short.decal;
    let long_decal = long.decal;
    pool.push(short, 99);
    pool.push(long, 99);

    // Expiry fires exactly at age == lifetime.
    assert_eq!(pool.age(1.0), vec![short_decal]);
    assert_eq!(pool.len(), 1);

    assert!(pool.age(0.5).is_empty());
    assert_eq!(pool.age(0.6), vec![long_decal]);
    assert!(pool.is_empty());

    // Nothing left to release on further ticks.
    assert!(pool.age(10.0).is_empty());
}

#[test]
fn survivors_never_outlive_their_lifetime() {
    let mut world = World::new();
    let mut pool = FootprintPool::default();
    for i in 0..10 {
        let r = record(&mut world, 0.5 + i as f32 * 0.7, false);
        pool.push(r, 99);
    }

    let mut released = Vec::new();
    for _ in 0..20 {
        released.extend(pool.age(0.4));
        assert!(pool.records().iter().all(|r| r.age < r.lifetime));
    }

    assert!(pool.is_empty());
    assert_eq!(released.len(), 10);
    released.sort();
    released.dedup();
    assert_eq!(released.len(), 10, "a decal was released twice");
}

#[test]
fn lifetime_formula() {
    let config = FootprintConfig::default(); // base 10, fade 5, highlight fade 10

    assert_eq!(compute_lifetime(&config, false, 8.0, 5.0), 15.0);

    // Highlighted: base + fade + remaining effect time + highlight fade.
    assert_eq!(compute_lifetime(&config, true, 8.0, 5.0), 28.0);

    // A stale scan clock never shortens the lifetime below the base terms.
    assert_eq!(compute_lifetime(&config, true, 8.0, 20.0), 25.0);
}

#[test]
fn reclassify_restarts_the_countdown_without_flicker() {
    let config = FootprintConfig::default();
    let mut world = World::new();
    let icon_total = 8.0;
    let scan_elapsed = 5.0;

    // Plain print, still outside: untouched.
    let mut plain = record(&mut world, 15.0, false);
    plain.age = 3.0;
    let outcome = reclassify_record(&mut plain, false, &config, icon_total, scan_elapsed);
    assert_eq!(outcome, ReclassifyOutcome::Unchanged);
    assert_eq!(plain.age, 3.0);
    assert_eq!(plain.lifetime, 15.0);

    // Plain print caught by the new pulse: highlighted variant, fresh clock.
    let mut caught = record(&mut world, 15.0, false);
    caught.age = 3.0;
    let outcome = reclassify_record(&mut caught, true, &config, icon_total, scan_elapsed);
    assert_eq!(outcome, ReclassifyOutcome::SwapVariant);
    assert!(caught.is_highlighted);
    assert_eq!(caught.age, 0.0);
    assert_eq!(caught.lifetime, 28.0);

    // Highlighted print re-caught: the clock restarts but the decal variant
    // stays, so a re-confirmed highlight does not flicker.
    caught.age = 4.0;
    let outcome = reclassify_record(&mut caught, true, &config, icon_total, scan_elapsed);
    assert_eq!(outcome, ReclassifyOutcome::Refreshed);
    assert!(caught.is_highlighted);
    assert_eq!(caught.age, 0.0);
    assert_eq!(caught.lifetime, 28.0);

    // Highlighted print missed by the new pulse: back to the plain variant.
    let outcome = reclassify_record(&mut caught, false, &config, icon_total, scan_elapsed);
    assert_eq!(outcome, ReclassifyOutcome::SwapVariant);
    assert!(!caught.is_highlighted);
    assert_eq!(caught.age, 0.0);
    assert_eq!(caught.lifetime, 15.0);
}

#[test]
fn decals_lie_across_the_travel_direction() {
    assert!((footprint_orientation(Vec2::X) - FRAC_PI_2).abs() < 1.0e-6);
    assert!((footprint_orientation(Vec2::Y) - PI).abs() < 1.0e-6);
}

#[test]
fn capacity_one_pool_cycles_its_single_slot() {
    let mut world = World::new();
    let mut pool = FootprintPool::default();

    let first = record(&mut world, 10.0, false);
    let first_decal = first.decal;
    assert_eq!(pool.push(first, 1), None);

    let second = record(&mut world, 10.0, false);
    let second_decal = second.decal;
    assert_eq!(pool.push(second, 1), Some(first_decal));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.records()[0].decal, second_decal);
}
