#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural encounter factory and boss behavior state machine.
//!
//! Generation synthesizes an immutable [`BossSpec`] from a seed and a
//! difficulty tier; the same inputs always produce the same specification.
//! The behavior machine then cycles a [`BossInstance`] through
//! TELEGRAPH → EXECUTE → RECOVER for each phase, wrapping back to phase zero
//! forever; the only way out is external removal at zero hit points.

use glam::Vec2;
use overrun_core::{
    BossBody, BossInstance, BossMount, BossMountKind, BossPhaseSpec, BossSpec, PhaseKind,
    PhaseState, WeakPoint,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fixed damage multiplier granted by every weak point.
pub const WEAK_POINT_MULTIPLIER: f32 = 2.0;

/// Seconds of the fixed recover cooldown between phases.
pub const RECOVER_SECONDS: f32 = 1.0;

/// Radius of the sweep orbit around the target, in world units.
const SWEEP_RADIUS: f32 = 260.0;

/// Radians per second the sweep orbit angle advances.
const SWEEP_ORBIT_RATE: f32 = 0.9;

/// Exponential smoothing rate pulling the hull onto the sweep orbit.
const SWEEP_SMOOTHING: f32 = 2.5;

/// Seconds between summon windows exposed to the external spawner.
const SUMMON_INTERVAL: f32 = 2.5;

const BODY_CATALOG: [(u32, u32, f32, f32); 4] = [
    // (sides, armor plates, min size, max size)
    (3, 1, 40.0, 60.0),
    (5, 2, 50.0, 75.0),
    (6, 3, 60.0, 90.0),
    (8, 4, 70.0, 110.0),
];

const MOUNT_CATALOG: [BossMount; 3] = [
    BossMount {
        kind: BossMountKind::Cannon,
        damage: 40.0,
        fire_rate: 0.5,
        range: 600.0,
        projectile_speed: 300.0,
    },
    BossMount {
        kind: BossMountKind::Rapid,
        damage: 8.0,
        fire_rate: 4.0,
        range: 420.0,
        projectile_speed: 520.0,
    },
    BossMount {
        kind: BossMountKind::Beam,
        damage: 18.0,
        fire_rate: 2.0,
        range: 760.0,
        projectile_speed: 900.0,
    },
];

const PHASE_CATALOG: [PhaseKind; 4] = [
    PhaseKind::Charge,
    PhaseKind::Sweep,
    PhaseKind::Burst,
    PhaseKind::Summon,
];

/// Tuning knobs for boss generation.
#[derive(Clone, Copy, Debug)]
pub struct GenerationConfig {
    /// Hit points of a tier-zero boss before scaling.
    pub base_hp: f32,
    /// Per-tier hit-point growth rate.
    pub hp_rate: f32,
    /// Contact damage of a tier-zero boss before scaling.
    pub base_damage: f32,
    /// Per-tier contact-damage growth rate.
    pub damage_rate: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_hp: 1_200.0,
            hp_rate: 0.25,
            base_damage: 30.0,
            damage_rate: 0.15,
        }
    }
}

/// Generates an immutable boss specification for a difficulty tier.
///
/// Deterministic: identical `(seed, tier, config)` inputs always yield an
/// identical specification.
#[must_use]
pub fn generate(seed: u64, tier: u32, config: GenerationConfig) -> BossSpec {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ u64::from(tier).rotate_left(17));
    let tier_f = tier as f32;

    let (sides, armor_plates, size_min, size_max) =
        BODY_CATALOG[rng.gen_range(0..BODY_CATALOG.len())];
    let body = BossBody {
        sides,
        armor_plates,
        size: rng.gen_range(size_min..=size_max),
    };

    let max_hp = config.base_hp * (1.0 + tier_f * config.hp_rate);
    let contact_damage = config.base_damage * (1.0 + tier_f * config.damage_rate);

    let mount_count = (1 + tier / 3).min(3) as usize;
    let mounts = (0..mount_count)
        .map(|_| MOUNT_CATALOG[rng.gen_range(0..MOUNT_CATALOG.len())])
        .collect();

    let phase_count = rng.gen_range(3..=4usize);
    let phases = (0..phase_count)
        .map(|_| {
            let kind = PHASE_CATALOG[rng.gen_range(0..PHASE_CATALOG.len())];
            roll_phase(kind, &mut rng)
        })
        .collect();

    let weak_point_count = rng.gen_range(0..=2u32);
    let weak_points = place_weak_points(weak_point_count, &mut rng);

    BossSpec::new(body, max_hp, contact_damage, mounts, phases, weak_points)
}

fn roll_phase(kind: PhaseKind, rng: &mut ChaCha8Rng) -> BossPhaseSpec {
    let (duration, telegraph, move_speed) = match kind {
        PhaseKind::Charge => (
            rng.gen_range(3.0..=5.0),
            rng.gen_range(0.8..=1.2),
            rng.gen_range(160.0..=220.0),
        ),
        PhaseKind::Sweep => (
            rng.gen_range(5.0..=7.0),
            rng.gen_range(1.0..=1.5),
            rng.gen_range(90.0..=130.0),
        ),
        PhaseKind::Burst => (rng.gen_range(4.0..=6.0), rng.gen_range(1.2..=1.8), 0.0),
        PhaseKind::Summon => (rng.gen_range(4.0..=6.0), rng.gen_range(1.0..=1.4), 0.0),
    };
    BossPhaseSpec {
        kind,
        duration,
        telegraph,
        move_speed,
    }
}

fn place_weak_points(count: u32, rng: &mut ChaCha8Rng) -> Vec<WeakPoint> {
    if count == 0 {
        return Vec::new();
    }
    let start = rng.gen_range(0.0..std::f32::consts::TAU);
    let spacing = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|index| WeakPoint {
            angle: (start + spacing * index as f32) % std::f32::consts::TAU,
            radius: rng.gen_range(10.0..=16.0),
            multiplier: WEAK_POINT_MULTIPLIER,
        })
        .collect()
}

/// Sub-state transition surfaced while advancing the behavior machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Phase index active after the transition.
    pub phase: usize,
    /// Sub-state the machine entered.
    pub state: PhaseState,
}

/// Advances a boss instance by one time delta.
///
/// Transitions that occurred during the step are appended to
/// `out_transitions` so the world can surface them as events.
pub fn advance(
    instance: &mut BossInstance,
    spec: &BossSpec,
    target: Vec2,
    dt: f32,
    out_transitions: &mut Vec<PhaseTransition>,
) {
    debug_assert!(instance.phase_index < spec.phases().len());
    let phase = spec.phases()[instance.phase_index];

    match instance.state {
        PhaseState::Telegraph => {
            face(instance, target);
            instance.state_timer -= dt;
            if instance.state_timer <= 0.0 {
                instance.state = PhaseState::Execute;
                instance.state_timer = phase.duration;
                instance.summon_cooldown = 0.0;
                out_transitions.push(PhaseTransition {
                    phase: instance.phase_index,
                    state: PhaseState::Execute,
                });
            }
        }
        PhaseState::Execute => {
            execute_behavior(instance, phase, target, dt);
            instance.state_timer -= dt;
            if instance.state_timer <= 0.0 {
                instance.state = PhaseState::Recover;
                instance.state_timer = RECOVER_SECONDS;
                out_transitions.push(PhaseTransition {
                    phase: instance.phase_index,
                    state: PhaseState::Recover,
                });
            }
        }
        PhaseState::Recover => {
            instance.state_timer -= dt;
            if instance.state_timer <= 0.0 {
                instance.phase_index = (instance.phase_index + 1) % spec.phases().len();
                instance.state = PhaseState::Telegraph;
                instance.state_timer = spec.phases()[instance.phase_index].telegraph;
                out_transitions.push(PhaseTransition {
                    phase: instance.phase_index,
                    state: PhaseState::Telegraph,
                });
            }
        }
    }
}

fn execute_behavior(instance: &mut BossInstance, phase: BossPhaseSpec, target: Vec2, dt: f32) {
    match phase.kind {
        PhaseKind::Charge => {
            face(instance, target);
            let direction = Vec2::from_angle(instance.rotation);
            instance.position += direction * phase.move_speed * dt;
        }
        PhaseKind::Sweep => {
            instance.orbit_angle += SWEEP_ORBIT_RATE * dt;
            let desired = target + Vec2::from_angle(instance.orbit_angle) * SWEEP_RADIUS;
            let blend = 1.0 - (-SWEEP_SMOOTHING * dt).exp();
            instance.position = instance.position.lerp(desired, blend);
            face(instance, target);
        }
        PhaseKind::Burst => {
            face(instance, target);
        }
        PhaseKind::Summon => {
            face(instance, target);
            instance.summon_cooldown -= dt;
            if instance.summon_cooldown <= 0.0 {
                instance.summon_cooldown = SUMMON_INTERVAL;
            }
        }
    }
}

fn face(instance: &mut BossInstance, target: Vec2) {
    let offset = target - instance.position;
    if offset.length_squared() > f32::EPSILON {
        instance.rotation = offset.y.atan2(offset.x);
    }
}

/// Resolves the damage multiplier for a projectile impact on the boss.
///
/// Each weak point is checked in declaration order; the first whose region
/// contains the impact wins. Hits outside every weak point multiply by 1.0.
#[must_use]
pub fn weak_point_multiplier(
    spec: &BossSpec,
    instance: &BossInstance,
    impact: Vec2,
    projectile_radius: f32,
) -> f32 {
    for weak_point in spec.weak_points() {
        let world_angle = instance.rotation + weak_point.angle;
        let world_position = instance.position + Vec2::from_angle(world_angle) * spec.body().size;
        let reach = weak_point.radius + projectile_radius;
        if impact.distance_squared(world_position) <= reach * reach {
            return weak_point.multiplier;
        }
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_phase_spec() -> BossSpec {
        BossSpec::new(
            BossBody {
                sides: 6,
                armor_plates: 2,
                size: 60.0,
            },
            1_500.0,
            30.0,
            vec![MOUNT_CATALOG[0]],
            vec![
                BossPhaseSpec {
                    kind: PhaseKind::Charge,
                    duration: 2.0,
                    telegraph: 0.5,
                    move_speed: 200.0,
                },
                BossPhaseSpec {
                    kind: PhaseKind::Sweep,
                    duration: 2.0,
                    telegraph: 0.5,
                    move_speed: 100.0,
                },
                BossPhaseSpec {
                    kind: PhaseKind::Burst,
                    duration: 2.0,
                    telegraph: 0.5,
                    move_speed: 0.0,
                },
            ],
            vec![WeakPoint {
                angle: 0.0,
                radius: 12.0,
                multiplier: WEAK_POINT_MULTIPLIER,
            }],
        )
    }

    #[test]
    fn generation_is_deterministic_for_identical_inputs() {
        let config = GenerationConfig::default();
        let first = generate(0xfeed, 5, config);
        let second = generate(0xfeed, 5, config);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_vary_the_specification() {
        let config = GenerationConfig::default();
        let specs: Vec<BossSpec> = (0..16).map(|seed| generate(seed, 3, config)).collect();
        let all_identical = specs.windows(2).all(|pair| pair[0] == pair[1]);
        assert!(!all_identical, "seeds should vary the generated boss");
    }

    #[test]
    fn generated_specs_respect_catalog_bounds() {
        let config = GenerationConfig::default();
        for seed in 0..64 {
            for tier in [0, 1, 3, 7, 12] {
                let spec = generate(seed, tier, config);
                assert!((1..=3).contains(&spec.mounts().len()));
                assert!((3..=4).contains(&spec.phases().len()));
                assert!(spec.weak_points().len() <= 2);
                assert!(spec.max_hp() > 0.0);
                for phase in spec.phases() {
                    assert!(phase.duration > 0.0);
                    assert!(phase.telegraph > 0.0);
                }
            }
        }
    }

    #[test]
    fn hp_scales_with_tier() {
        let config = GenerationConfig::default();
        let low = generate(9, 0, config);
        let high = generate(9, 10, config);
        assert!(high.max_hp() > low.max_hp());
        assert!(high.contact_damage() > low.contact_damage());
    }

    #[test]
    fn mount_count_grows_with_tier() {
        let config = GenerationConfig::default();
        assert_eq!(generate(1, 0, config).mounts().len(), 1);
        assert_eq!(generate(1, 3, config).mounts().len(), 2);
        assert_eq!(generate(1, 9, config).mounts().len(), 3);
    }

    #[test]
    fn three_phases_cycle_back_to_phase_zero() {
        let spec = three_phase_spec();
        let mut instance = BossInstance::from_spec(&spec, Vec2::new(400.0, 0.0));
        let mut transitions = Vec::new();

        // Run long enough for all three phases to complete one full cycle.
        let dt = 0.1;
        let mut steps = 0;
        while transitions
            .iter()
            .filter(|transition: &&PhaseTransition| transition.state == PhaseState::Telegraph)
            .count()
            < 3
        {
            advance(&mut instance, &spec, Vec2::ZERO, dt, &mut transitions);
            steps += 1;
            assert!(steps < 10_000, "cycle failed to complete");
            assert!(instance.phase_index < spec.phases().len());
        }

        let telegraphs: Vec<usize> = transitions
            .iter()
            .filter(|transition| transition.state == PhaseState::Telegraph)
            .map(|transition| transition.phase)
            .collect();
        assert_eq!(telegraphs, vec![1, 2, 0]);

        let executes = transitions
            .iter()
            .filter(|transition| transition.state == PhaseState::Execute)
            .count();
        assert!(executes >= 3, "each phase telegraph leads into execute");
    }

    #[test]
    fn telegraph_holds_until_its_duration_expires() {
        let spec = three_phase_spec();
        let mut instance = BossInstance::from_spec(&spec, Vec2::new(400.0, 0.0));
        let mut transitions = Vec::new();

        advance(&mut instance, &spec, Vec2::ZERO, 0.4, &mut transitions);
        assert_eq!(instance.state, PhaseState::Telegraph);
        assert!(transitions.is_empty());

        advance(&mut instance, &spec, Vec2::ZERO, 0.2, &mut transitions);
        assert_eq!(instance.state, PhaseState::Execute);
    }

    #[test]
    fn charge_moves_straight_at_the_target() {
        let spec = three_phase_spec();
        let mut instance = BossInstance::from_spec(&spec, Vec2::new(400.0, 0.0));
        instance.state = PhaseState::Execute;
        instance.state_timer = 2.0;
        let mut transitions = Vec::new();

        let before = instance.position;
        advance(&mut instance, &spec, Vec2::ZERO, 0.5, &mut transitions);
        let after = instance.position;
        assert!(after.x < before.x, "charge closes the distance");
        assert!((after.y - before.y).abs() < 1.0);
    }

    #[test]
    fn sweep_pulls_the_hull_onto_the_orbit_ring() {
        let spec = three_phase_spec();
        let mut instance = BossInstance::from_spec(&spec, Vec2::new(1_000.0, 0.0));
        instance.phase_index = 1;
        instance.state = PhaseState::Execute;
        instance.state_timer = f32::MAX;
        let mut transitions = Vec::new();

        for _ in 0..400 {
            advance(&mut instance, &spec, Vec2::ZERO, 0.05, &mut transitions);
        }
        let distance = instance.position.length();
        assert!(
            (distance - 260.0).abs() < 30.0,
            "hull should settle near the orbit radius, got {distance}"
        );
    }

    #[test]
    fn summon_phase_recycles_its_cooldown() {
        let spec = BossSpec::new(
            BossBody {
                sides: 5,
                armor_plates: 2,
                size: 50.0,
            },
            1_000.0,
            25.0,
            vec![MOUNT_CATALOG[1]],
            vec![
                BossPhaseSpec {
                    kind: PhaseKind::Summon,
                    duration: 30.0,
                    telegraph: 0.1,
                    move_speed: 0.0,
                },
                BossPhaseSpec {
                    kind: PhaseKind::Burst,
                    duration: 2.0,
                    telegraph: 0.5,
                    move_speed: 0.0,
                },
                BossPhaseSpec {
                    kind: PhaseKind::Charge,
                    duration: 2.0,
                    telegraph: 0.5,
                    move_speed: 150.0,
                },
            ],
            Vec::new(),
        );
        let mut instance = BossInstance::from_spec(&spec, Vec2::new(300.0, 0.0));
        instance.state = PhaseState::Execute;
        instance.state_timer = 30.0;
        let mut transitions = Vec::new();

        advance(&mut instance, &spec, Vec2::ZERO, 0.1, &mut transitions);
        let primed = instance.summon_cooldown;
        assert!(primed > 0.0, "cooldown rearms after hitting zero");

        advance(&mut instance, &spec, Vec2::ZERO, 0.1, &mut transitions);
        assert!(instance.summon_cooldown < primed);
    }

    #[test]
    fn weak_point_hit_doubles_damage() {
        let spec = three_phase_spec();
        let instance = BossInstance::from_spec(&spec, Vec2::ZERO);
        // Weak point at hull angle 0 with rotation 0 sits at (size, 0).
        let impact = Vec2::new(spec.body().size, 0.0);
        let multiplier = weak_point_multiplier(&spec, &instance, impact, 4.0);
        assert_eq!(multiplier, WEAK_POINT_MULTIPLIER);
    }

    #[test]
    fn hit_outside_weak_points_multiplies_by_one() {
        let spec = three_phase_spec();
        let instance = BossInstance::from_spec(&spec, Vec2::ZERO);
        let impact = Vec2::new(-spec.body().size, 0.0);
        let multiplier = weak_point_multiplier(&spec, &instance, impact, 4.0);
        assert_eq!(multiplier, 1.0);
    }

    #[test]
    fn weak_points_rotate_with_the_hull() {
        let spec = three_phase_spec();
        let mut instance = BossInstance::from_spec(&spec, Vec2::ZERO);
        instance.rotation = std::f32::consts::PI;
        let impact = Vec2::new(-spec.body().size, 0.0);
        assert_eq!(
            weak_point_multiplier(&spec, &instance, impact, 4.0),
            WEAK_POINT_MULTIPLIER
        );
    }
}
