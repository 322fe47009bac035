#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line driver that runs Overrun waves to completion.
//!
//! Builds a convoy, mounts a small battery of emplacements, then spawns
//! difficulty-scaled waves in a ring around the defense and pumps fire
//! control and the world until each wave is cleared. Two runs with the same
//! seed and tick length print identical summaries.

use std::f32::consts::TAU;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use glam::Vec2;
use overrun_core::{
    Armament, Command, EnemyKind, Event, SegmentId, SegmentSeed, StatScale, WeaponCategory,
};
use overrun_system_difficulty::{CurveConfig, Difficulty};
use overrun_system_encounter::GenerationConfig;
use overrun_system_fire_control::{FireControl, FireControlConfig};
use overrun_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance from the convoy at which new enemies appear.
const SPAWN_RADIUS: f32 = 700.0;

/// Simulated seconds granted to clear a wave before it is abandoned.
const WAVE_TIME_LIMIT_SECS: f32 = 60.0;

/// Stat multiplier applied on top of wave scaling for elite spawns.
const ELITE_BONUS: f32 = 1.5;

#[derive(Debug, Parser)]
#[command(name = "overrun", about = "Headless Overrun wave simulation")]
struct Args {
    /// Number of waves to simulate.
    #[arg(long, default_value_t = 20)]
    waves: u32,

    /// Seed shared by spawning and boss generation.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Fixed tick length in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
}

#[derive(Debug, Default)]
struct RunTotals {
    waves_cleared: u32,
    waves_abandoned: u32,
    enemies_destroyed: u64,
    bosses_spawned: u32,
    bosses_defeated: u32,
    defense_hits: u64,
    convoy_losses: u32,
}

/// Entry point for the Overrun command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.waves >= 1, "--waves must be at least 1");
    ensure!(args.tick_ms >= 1, "--tick-ms must be at least 1");

    let totals = run(&args);

    println!("seed {:#x}, {} waves requested", args.seed, args.waves);
    println!(
        "waves cleared {} / abandoned {}",
        totals.waves_cleared, totals.waves_abandoned
    );
    println!("enemies destroyed {}", totals.enemies_destroyed);
    println!(
        "bosses defeated {} / {}",
        totals.bosses_defeated, totals.bosses_spawned
    );
    println!(
        "defense hits {} (convoys lost {})",
        totals.defense_hits, totals.convoy_losses
    );
    Ok(())
}

fn run(args: &Args) -> RunTotals {
    let dt = Duration::from_millis(args.tick_ms);
    let ticks_per_wave = (WAVE_TIME_LIMIT_SECS / dt.as_secs_f32()).ceil() as u32;

    let mut world = World::new();
    let mut events = Vec::new();
    configure_defense(&mut world, &mut events);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut difficulty = Difficulty::new(CurveConfig::default());
    let mut fire_control = FireControl::new();
    let fire_config = FireControlConfig::default();
    let mut commands = Vec::new();
    let mut totals = RunTotals::default();

    for wave in 1..=args.waves {
        let scaling = difficulty.scaling_for(wave);
        spawn_wave(&mut world, &mut rng, &scaling, &mut events, &mut totals);
        if scaling.boss_wave {
            spawn_boss(&mut world, args.seed, difficulty.boss_tier(wave), &mut events);
            totals.bosses_spawned += 1;
        }

        let mut cleared = false;
        for _ in 0..ticks_per_wave {
            commands.clear();
            fire_control.handle(
                &query::emplacement_view(&world),
                query::vehicle(&world).as_ref(),
                &query::enemy_view(&world),
                &fire_config,
                &mut commands,
            );
            for command in commands.drain(..) {
                world::apply(&mut world, command, &mut events);
            }
            let boss_was_alive = query::boss(&world).is_some();
            world::apply(&mut world, Command::Tick { dt }, &mut events);
            tally_events(&mut events, &mut totals);

            // Only depleted hit points remove a boss mid-wave.
            if boss_was_alive && query::boss(&world).is_none() {
                totals.bosses_defeated += 1;
            }
            if convoy_destroyed(&world) {
                difficulty.record_death(wave);
                totals.convoy_losses += 1;
                world::apply(&mut world, Command::Clear, &mut events);
                configure_defense(&mut world, &mut events);
                break;
            }
            if query::enemy_view(&world).is_empty() {
                cleared = true;
                break;
            }
        }

        if cleared {
            totals.waves_cleared += 1;
            difficulty.record_best(wave);
        } else {
            totals.waves_abandoned += 1;
            world::apply(&mut world, Command::Clear, &mut events);
        }
        events.clear();
    }

    totals
}

fn configure_defense(world: &mut World, events: &mut Vec<Event>) {
    world::apply(
        world,
        Command::ConfigureConvoy {
            segments: (0..3)
                .map(|index| SegmentSeed {
                    id: SegmentId::new(index),
                    position: Vec2::new(index as f32 * 90.0 - 90.0, 0.0),
                    radius: 34.0,
                    hp: 600.0,
                })
                .collect(),
        },
        events,
    );
    world::apply(
        world,
        Command::ConfigureVehicle {
            position: Vec2::ZERO,
            heading: Vec2::X,
        },
        events,
    );
    if query::emplacement_view(world).is_empty() {
        for (category, angle) in [
            (WeaponCategory::Cannon, 0.0_f32),
            (WeaponCategory::Cannon, 0.25),
            (WeaponCategory::MachineGun, 0.5),
            (WeaponCategory::Railgun, 0.75),
        ] {
            world::apply(
                world,
                Command::MountEmplacement {
                    armament: Armament { category, tier: 1 },
                    position: Vec2::from_angle(angle * TAU) * 140.0,
                },
                events,
            );
        }
    }
}

fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scaling: &overrun_system_difficulty::WaveScaling,
    events: &mut Vec<Event>,
    totals: &mut RunTotals,
) {
    for _ in 0..scaling.spawn_count {
        let kind = match rng.gen_range(0_u8..4) {
            0 => EnemyKind::Crawler,
            1 => EnemyKind::Sprinter,
            2 => EnemyKind::Brute,
            _ => EnemyKind::Husk,
        };
        let angle = rng.gen::<f32>() * TAU;
        let mut scale = scaling.stat_scale();
        if scaling.elite_wave && rng.gen::<f64>() < scaling.elite_chance {
            scale = StatScale {
                hp: scale.hp * ELITE_BONUS,
                damage: scale.damage * ELITE_BONUS,
                speed: scale.speed,
            };
        }
        world::apply(
            world,
            Command::SpawnEnemy {
                kind,
                position: Vec2::from_angle(angle) * SPAWN_RADIUS,
                scale,
            },
            events,
        );
    }
    tally_events(events, totals);
}

fn spawn_boss(world: &mut World, seed: u64, tier: u32, events: &mut Vec<Event>) {
    let spec = overrun_system_encounter::generate(seed, tier, GenerationConfig::default());
    world::apply(
        world,
        Command::SpawnBoss {
            spec,
            position: Vec2::new(SPAWN_RADIUS, 0.0),
        },
        events,
    );
}

fn convoy_destroyed(world: &World) -> bool {
    let segments = query::segment_view(world);
    !segments.is_empty() && segments.iter().all(|segment| segment.hp <= 0.0)
}

fn tally_events(events: &mut Vec<Event>, totals: &mut RunTotals) {
    for event in events.drain(..) {
        match event {
            Event::EnemyDestroyed { .. } => totals.enemies_destroyed += 1,
            Event::DefenseHit { .. } => totals.defense_hits += 1,
            _ => {}
        }
    }
}
