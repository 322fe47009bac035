#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative combat world for the Overrun simulation.
//!
//! The world exclusively owns every enemy, projectile, emplacement, convoy
//! segment, and boss instance. Collaborators mutate it only through
//! [`apply`], one command at a time, and observe it through the emitted
//! [`Event`] stream and the read-only views in [`query`]. A tick is fully
//! synchronous: all mutation happens in place and becomes visible to the
//! next tick.

use glam::Vec2;
use overrun_core::{
    Armament, BossInstance, BossSpec, Command, EmplacementId, EnemyId, EnemyKind, Event,
    FireSource, ProjectileId, SegmentId, SegmentSeed, SlowEffect, StatScale, WeaponCategory,
    WeaponProfile,
};
use overrun_system_armory::{composite_profile, composite_rating, CompositeThresholds};
use overrun_system_encounter::PhaseTransition;

/// Collision radius shared by all projectiles, in world units.
const PROJECTILE_RADIUS: f32 = 4.0;

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    rotation: f32,
    hp: f32,
    max_hp: f32,
    speed: f32,
    contact_damage: f32,
    radius: f32,
    armor: f32,
    slow_timer: f32,
    slow_factor: f32,
}

impl Enemy {
    fn effective_speed(&self) -> f32 {
        if self.slow_timer > 0.0 {
            self.speed * self.slow_factor
        } else {
            self.speed
        }
    }
}

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    category: WeaponCategory,
    position: Vec2,
    velocity: Vec2,
    travelled: f32,
    range: f32,
    damage: f32,
    pierce_fraction: f32,
    slow: Option<SlowEffect>,
}

#[derive(Clone, Debug)]
struct Emplacement {
    id: EmplacementId,
    armament: Armament,
    position: Vec2,
    cooldown: f32,
}

#[derive(Clone, Debug)]
struct Segment {
    id: SegmentId,
    position: Vec2,
    radius: f32,
    hp: f32,
}

#[derive(Clone, Debug)]
struct Vehicle {
    position: Vec2,
    heading: Vec2,
    cooldown: f32,
}

/// Represents the authoritative combat world state.
#[derive(Debug, Default)]
pub struct World {
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    emplacements: Vec<Emplacement>,
    segments: Vec<Segment>,
    vehicle: Option<Vehicle>,
    boss: Option<(BossSpec, BossInstance)>,
    next_enemy_id: u32,
    next_projectile_id: u32,
    next_emplacement_id: u32,
    kill_count: u64,
    tick_index: u64,
    transition_scratch: Vec<PhaseTransition>,
}

impl World {
    /// Creates a new empty combat world ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            let dt = dt.as_secs_f32();
            advance_enemies(world, dt, out_events);
            advance_projectiles(world, dt, out_events);
            decay_cooldowns(world, dt);
            advance_boss(world, dt, out_events);
        }
        Command::ConfigureConvoy { segments } => {
            world.segments = segments.into_iter().map(segment_from_seed).collect();
            world.segments.sort_by_key(|segment| segment.id);
        }
        Command::ConfigureVehicle { position, heading } => {
            world.vehicle = Some(Vehicle {
                position,
                heading: heading.normalize_or_zero(),
                cooldown: 0.0,
            });
        }
        Command::MountEmplacement { armament, position } => {
            assert!(armament.tier >= 1, "weapon tier starts at 1");
            let id = EmplacementId::new(world.next_emplacement_id);
            world.next_emplacement_id += 1;
            world.emplacements.push(Emplacement {
                id,
                armament,
                position,
                cooldown: 0.0,
            });
        }
        Command::SpawnEnemy {
            kind,
            position,
            scale,
        } => {
            spawn_enemy(world, kind, position, scale, out_events);
        }
        Command::SpawnBoss { spec, position } => {
            let instance = BossInstance::from_spec(&spec, position);
            world.boss = Some((spec, instance));
        }
        Command::FireWeapon { source, target } => {
            fire_weapon(world, source, target, out_events);
        }
        Command::AreaDamage {
            center,
            radius,
            damage,
        } => {
            damage_enemies(world, out_events, damage, |enemy| {
                let reach = radius + enemy.radius;
                enemy.position.distance_squared(center) <= reach * reach
            });
        }
        Command::BurstDamage { damage } => {
            damage_enemies(world, out_events, damage, |_| true);
        }
        Command::Clear => {
            // Discarded entities are not kills: no events, no counters.
            world.enemies.clear();
            world.projectiles.clear();
            world.boss = None;
        }
    }
}

fn segment_from_seed(seed: SegmentSeed) -> Segment {
    Segment {
        id: seed.id,
        position: seed.position,
        radius: seed.radius,
        hp: seed.hp,
    }
}

fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    position: Vec2,
    scale: StatScale,
    out_events: &mut Vec<Event>,
) {
    let id = EnemyId::new(world.next_enemy_id);
    world.next_enemy_id += 1;
    let max_hp = kind.base_hp() * scale.hp;
    world.enemies.push(Enemy {
        id,
        kind,
        position,
        rotation: 0.0,
        hp: max_hp,
        max_hp,
        speed: kind.base_speed() * scale.speed,
        contact_damage: kind.base_contact_damage() * scale.damage,
        radius: kind.radius(),
        armor: kind.armor(),
        slow_timer: 0.0,
        slow_factor: 1.0,
    });
    out_events.push(Event::EnemySpawned { enemy: id, kind });
}

/// Advances every enemy: slow decay, steering at the nearest defended
/// segment, and contact resolution.
fn advance_enemies(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let World {
        enemies, segments, ..
    } = world;

    let mut index = 0;
    while index < enemies.len() {
        let enemy = &mut enemies[index];

        if enemy.slow_timer > 0.0 {
            enemy.slow_timer = (enemy.slow_timer - dt).max(0.0);
            if enemy.slow_timer == 0.0 {
                enemy.slow_factor = 1.0;
            }
        }

        let Some(segment_index) = nearest_segment(segments, enemy.position) else {
            // No convoy to attack: enemies idle in place, a valid no-op.
            index += 1;
            continue;
        };

        let segment = &mut segments[segment_index];
        let offset = segment.position - enemy.position;
        if offset.length_squared() > f32::EPSILON {
            let direction = offset.normalize();
            enemy.rotation = direction.y.atan2(direction.x);
            enemy.position += direction * enemy.effective_speed() * dt;
        }

        let reach = enemy.radius + segment.radius;
        if enemy.position.distance_squared(segment.position) <= reach * reach {
            let impact = segment.position
                + (enemy.position - segment.position).normalize_or_zero() * segment.radius;
            segment.hp = (segment.hp - enemy.contact_damage).max(0.0);
            out_events.push(Event::DefenseHit {
                segment: segment.id,
                damage: enemy.contact_damage,
                remaining: segment.hp,
                impact,
                source: enemy.kind,
            });
            let _ = enemies.remove(index);
            continue;
        }

        index += 1;
    }
}

fn nearest_segment(segments: &[Segment], position: Vec2) -> Option<usize> {
    let mut best: Option<(f32, usize)> = None;
    for (index, segment) in segments.iter().enumerate() {
        let distance_sq = segment.position.distance_squared(position);
        match best {
            Some((best_distance, _)) if distance_sq >= best_distance => {}
            _ => best = Some((distance_sq, index)),
        }
    }
    best.map(|(_, index)| index)
}

/// Advances every projectile along its velocity, resolving enemy and boss
/// collisions and range exhaustion.
fn advance_projectiles(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let mut index = 0;
    while index < world.projectiles.len() {
        let projectile = &mut world.projectiles[index];

        // Travel never exceeds the configured range budget.
        let step = (projectile.velocity.length() * dt).min(projectile.range - projectile.travelled);
        projectile.position += projectile.velocity.normalize_or_zero() * step;
        projectile.travelled += step;

        let projectile = world.projectiles[index].clone();
        if projectile.travelled >= projectile.range {
            // A spent projectile is a miss even if it stopped on a target.
            let _ = world.projectiles.remove(index);
            continue;
        }

        if let Some(hit_enemy) = first_enemy_contact(&world.enemies, &projectile) {
            resolve_projectile_hit(world, hit_enemy, &projectile, out_events);
            let _ = world.projectiles.remove(index);
            continue;
        }

        if boss_contact(world, &projectile) {
            resolve_boss_hit(world, &projectile);
            let _ = world.projectiles.remove(index);
            continue;
        }

        index += 1;
    }
}

fn first_enemy_contact(enemies: &[Enemy], projectile: &Projectile) -> Option<usize> {
    enemies.iter().position(|enemy| {
        let reach = enemy.radius + PROJECTILE_RADIUS;
        enemy.position.distance_squared(projectile.position) <= reach * reach
    })
}

fn resolve_projectile_hit(
    world: &mut World,
    enemy_index: usize,
    projectile: &Projectile,
    out_events: &mut Vec<Event>,
) {
    let enemy = &mut world.enemies[enemy_index];
    let applied =
        (projectile.damage - enemy.armor * (1.0 - projectile.pierce_fraction)).max(0.0);
    enemy.hp -= applied;

    if let Some(slow) = projectile.slow {
        enemy.slow_factor = slow.factor;
        enemy.slow_timer = slow.duration;
    }

    if enemy.hp <= 0.0 {
        let destroyed = world.enemies.remove(enemy_index);
        world.kill_count += 1;
        out_events.push(Event::EnemyDestroyed {
            enemy: destroyed.id,
            kind: destroyed.kind,
            position: destroyed.position,
        });
    }
}

fn boss_contact(world: &World, projectile: &Projectile) -> bool {
    world.boss.as_ref().is_some_and(|(spec, instance)| {
        let reach = spec.body().size + PROJECTILE_RADIUS;
        instance.position.distance_squared(projectile.position) <= reach * reach
    })
}

fn resolve_boss_hit(world: &mut World, projectile: &Projectile) {
    let Some((spec, instance)) = &mut world.boss else {
        return;
    };
    let multiplier = overrun_system_encounter::weak_point_multiplier(
        spec,
        instance,
        projectile.position,
        PROJECTILE_RADIUS,
    );
    instance.hp -= projectile.damage * multiplier;
    if instance.hp <= 0.0 {
        world.boss = None;
    }
}

fn decay_cooldowns(world: &mut World, dt: f32) {
    for emplacement in &mut world.emplacements {
        emplacement.cooldown = (emplacement.cooldown - dt).max(0.0);
    }
    if let Some(vehicle) = &mut world.vehicle {
        vehicle.cooldown = (vehicle.cooldown - dt).max(0.0);
    }
}

fn advance_boss(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let target = world
        .vehicle
        .as_ref()
        .map(|vehicle| vehicle.position)
        .or_else(|| world.segments.first().map(|segment| segment.position))
        .unwrap_or(Vec2::ZERO);

    let Some((spec, instance)) = &mut world.boss else {
        return;
    };

    world.transition_scratch.clear();
    overrun_system_encounter::advance(instance, spec, target, dt, &mut world.transition_scratch);
    for transition in world.transition_scratch.drain(..) {
        out_events.push(Event::BossPhaseChanged {
            phase: transition.phase,
            state: transition.state,
        });
    }
}

fn fire_weapon(
    world: &mut World,
    source: FireSource,
    target: EnemyId,
    out_events: &mut Vec<Event>,
) {
    // A vanished target is a valid no-op: the enemy died mid-tick.
    let Some(target_position) = world
        .enemies
        .iter()
        .find(|enemy| enemy.id == target)
        .map(|enemy| enemy.position)
    else {
        return;
    };

    let (origin, category, profile) = match source {
        FireSource::Turret(id) => {
            let Some(emplacement) = world
                .emplacements
                .iter_mut()
                .find(|emplacement| emplacement.id == id)
            else {
                return;
            };
            if emplacement.cooldown > 0.0 {
                return;
            }
            let profile = overrun_system_armory::profile(
                emplacement.armament.category,
                emplacement.armament.tier,
            );
            emplacement.cooldown = 1.0 / profile.fire_rate;
            (emplacement.position, emplacement.armament.category, profile)
        }
        FireSource::Composite => {
            let view = query::emplacement_view_of(&world.emplacements);
            let Some(rating) = composite_rating(&view, CompositeThresholds::default()) else {
                return;
            };
            let Some(vehicle) = &mut world.vehicle else {
                return;
            };
            if vehicle.cooldown > 0.0 {
                return;
            }
            let profile = composite_profile(rating.category, rating.tier);
            vehicle.cooldown = 1.0 / profile.fire_rate;
            (vehicle.position, rating.category, profile)
        }
    };

    spawn_projectile(world, origin, target_position, category, &profile);
    out_events.push(Event::WeaponFired { source, category });
}

fn spawn_projectile(
    world: &mut World,
    origin: Vec2,
    target: Vec2,
    category: WeaponCategory,
    profile: &WeaponProfile,
) {
    let offset = target - origin;
    let direction = if offset.length_squared() > f32::EPSILON {
        offset / offset.length()
    } else {
        Vec2::X
    };
    let id = ProjectileId::new(world.next_projectile_id);
    world.next_projectile_id += 1;
    world.projectiles.push(Projectile {
        id,
        category,
        position: origin,
        velocity: direction * profile.projectile_speed,
        travelled: 0.0,
        range: profile.range,
        damage: profile.damage,
        pierce_fraction: profile.pierce_fraction,
        slow: profile.slow,
    });
}

/// Applies flat damage to every enemy matching the predicate, bypassing the
/// projectile pipeline entirely.
fn damage_enemies<F>(world: &mut World, out_events: &mut Vec<Event>, damage: f32, matches: F)
where
    F: Fn(&Enemy) -> bool,
{
    let mut index = 0;
    while index < world.enemies.len() {
        let enemy = &mut world.enemies[index];
        if !matches(enemy) {
            index += 1;
            continue;
        }
        enemy.hp -= damage;
        if enemy.hp <= 0.0 {
            let destroyed = world.enemies.remove(index);
            world.kill_count += 1;
            out_events.push(Event::EnemyDestroyed {
                enemy: destroyed.id,
                kind: destroyed.kind,
                position: destroyed.position,
            });
            continue;
        }
        index += 1;
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Emplacement, World};
    use overrun_core::{
        BossInstance, BossSpec, EmplacementSnapshot, EmplacementView, EnemySnapshot, EnemyView,
        ProjectileSnapshot, ProjectileView, SegmentSnapshot, SegmentView, VehicleSnapshot,
    };

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                rotation: enemy.rotation,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
                speed: enemy.speed,
                contact_damage: enemy.contact_damage,
                radius: enemy.radius,
                armor: enemy.armor,
                slow_remaining: enemy.slow_timer,
                slow_factor: enemy.slow_factor,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the live projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                category: projectile.category,
                position: projectile.position,
                velocity: projectile.velocity,
                travelled: projectile.travelled,
                range: projectile.range,
                damage: projectile.damage,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the mounted turret emplacements.
    #[must_use]
    pub fn emplacement_view(world: &World) -> EmplacementView {
        emplacement_view_of(&world.emplacements)
    }

    pub(super) fn emplacement_view_of(emplacements: &[Emplacement]) -> EmplacementView {
        let snapshots: Vec<EmplacementSnapshot> = emplacements
            .iter()
            .map(|emplacement| EmplacementSnapshot {
                id: emplacement.id,
                armament: emplacement.armament,
                position: emplacement.position,
                ready_in: emplacement.cooldown,
            })
            .collect();
        EmplacementView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the defended convoy segments.
    #[must_use]
    pub fn segment_view(world: &World) -> SegmentView {
        let snapshots: Vec<SegmentSnapshot> = world
            .segments
            .iter()
            .map(|segment| SegmentSnapshot {
                id: segment.id,
                position: segment.position,
                radius: segment.radius,
                hp: segment.hp,
            })
            .collect();
        SegmentView::from_snapshots(snapshots)
    }

    /// Snapshot of the vehicle and its composite weapon, if configured.
    #[must_use]
    pub fn vehicle(world: &World) -> Option<VehicleSnapshot> {
        world.vehicle.as_ref().map(|vehicle| VehicleSnapshot {
            position: vehicle.position,
            heading: vehicle.heading,
            ready_in: vehicle.cooldown,
        })
    }

    /// Borrow of the active boss encounter, if one is running.
    #[must_use]
    pub fn boss(world: &World) -> Option<(&BossSpec, &BossInstance)> {
        world.boss.as_ref().map(|(spec, instance)| (spec, instance))
    }

    /// Number of enemies destroyed by weapon damage since the world began.
    #[must_use]
    pub fn kill_count(world: &World) -> u64 {
        world.kill_count
    }

    /// Number of ticks the world has processed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn convoy_at_origin() -> Command {
        Command::ConfigureConvoy {
            segments: vec![SegmentSeed {
                id: SegmentId::new(0),
                position: Vec2::ZERO,
                radius: 30.0,
                hp: 500.0,
            }],
        }
    }

    fn spawn(world: &mut World, kind: EnemyKind, position: Vec2) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                kind,
                position,
                scale: StatScale::IDENTITY,
            },
            &mut events,
        );
        events
    }

    fn tick(world: &mut World, seconds: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_secs_f32(seconds),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn enemies_steer_toward_the_nearest_segment() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, convoy_at_origin(), &mut events);
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(400.0, 0.0));

        let _ = tick(&mut world, 0.5);
        let view = query::enemy_view(&world);
        let enemy = view.iter().next().expect("enemy survives the tick");
        // Crawler speed 80 over half a second closes 40 units.
        assert!((enemy.position.x - 360.0).abs() < 1e-3);
    }

    #[test]
    fn contact_damages_the_segment_and_removes_the_enemy() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, convoy_at_origin(), &mut events);
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(55.0, 0.0));

        let events = tick(&mut world, 0.1);
        let hit = events.iter().find_map(|event| match event {
            Event::DefenseHit {
                segment,
                damage,
                remaining,
                ..
            } => Some((*segment, *damage, *remaining)),
            _ => None,
        });
        let (segment, damage, remaining) = hit.expect("contact emits a defense hit");
        assert_eq!(segment, SegmentId::new(0));
        assert_eq!(damage, EnemyKind::Crawler.base_contact_damage());
        assert_eq!(remaining, 500.0 - damage);
        assert!(query::enemy_view(&world).is_empty());
        // Contact removal is not a kill.
        assert_eq!(query::kill_count(&world), 0);
    }

    #[test]
    fn stat_scale_multiplies_spawn_stats() {
        let mut world = World::new();
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::ZERO);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                kind: EnemyKind::Crawler,
                position: Vec2::ZERO,
                scale: StatScale {
                    hp: 3.0,
                    damage: 2.0,
                    speed: 1.5,
                },
            },
            &mut events,
        );

        let view = query::enemy_view(&world);
        let scaled = view.iter().nth(1).expect("second spawn");
        assert_eq!(scaled.max_hp, EnemyKind::Crawler.base_hp() * 3.0);
        assert_eq!(
            scaled.contact_damage,
            EnemyKind::Crawler.base_contact_damage() * 2.0
        );
        assert_eq!(scaled.speed, EnemyKind::Crawler.base_speed() * 1.5);
    }

    #[test]
    fn clear_discards_everything_without_kill_credit() {
        let mut world = World::new();
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(100.0, 0.0));
        let _ = spawn(&mut world, EnemyKind::Brute, Vec2::new(200.0, 0.0));
        let mut events = Vec::new();
        apply(&mut world, Command::Clear, &mut events);

        assert!(events.is_empty());
        assert!(query::enemy_view(&world).is_empty());
        assert!(query::projectile_view(&world).is_empty());
        assert_eq!(query::kill_count(&world), 0);
    }

    #[test]
    fn burst_damage_hits_every_enemy_unconditionally() {
        let mut world = World::new();
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(100.0, 0.0));
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(9_000.0, 0.0));
        let mut events = Vec::new();
        apply(&mut world, Command::BurstDamage { damage: 50.0 }, &mut events);

        let destroyed = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 2);
        assert_eq!(query::kill_count(&world), 2);
    }

    #[test]
    fn area_damage_respects_its_radius() {
        let mut world = World::new();
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(50.0, 0.0));
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(500.0, 0.0));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AreaDamage {
                center: Vec2::ZERO,
                radius: 100.0,
                damage: 50.0,
            },
            &mut events,
        );

        assert_eq!(query::kill_count(&world), 1);
        let view = query::enemy_view(&world);
        assert_eq!(view.len(), 1);
        let survivor = view.iter().next().expect("far enemy survives");
        assert_eq!(survivor.position.x, 500.0);
    }

    #[test]
    fn mount_allocates_ascending_emplacement_ids() {
        let mut world = World::new();
        let mut events = Vec::new();
        for _ in 0..3 {
            apply(
                &mut world,
                Command::MountEmplacement {
                    armament: Armament {
                        category: WeaponCategory::Cannon,
                        tier: 1,
                    },
                    position: Vec2::ZERO,
                },
                &mut events,
            );
        }
        let ids: Vec<u32> = query::emplacement_view(&world)
            .iter()
            .map(|snapshot| snapshot.id.get())
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn fire_weapon_spawns_a_projectile_and_resets_cooldown() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MountEmplacement {
                armament: Armament {
                    category: WeaponCategory::Cannon,
                    tier: 1,
                },
                position: Vec2::ZERO,
            },
            &mut events,
        );
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(300.0, 0.0));

        events.clear();
        apply(
            &mut world,
            Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(0)),
                target: EnemyId::new(0),
            },
            &mut events,
        );

        assert!(events.iter().any(|event| matches!(
            event,
            Event::WeaponFired {
                source: FireSource::Turret(_),
                category: WeaponCategory::Cannon,
            }
        )));
        assert_eq!(query::projectile_view(&world).len(), 1);
        let emplacement = query::emplacement_view(&world)
            .into_vec()
            .pop()
            .expect("emplacement exists");
        // Tier-1 cannon fires at 0.8 shots per second.
        assert!((emplacement.ready_in - 1.25).abs() < 1e-4);

        // A second fire while cooling is a no-op.
        events.clear();
        apply(
            &mut world,
            Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(0)),
                target: EnemyId::new(0),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::projectile_view(&world).len(), 1);
    }

    #[test]
    fn firing_at_a_vanished_target_is_a_no_op() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MountEmplacement {
                armament: Armament {
                    category: WeaponCategory::Cannon,
                    tier: 1,
                },
                position: Vec2::ZERO,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(0)),
                target: EnemyId::new(99),
            },
            &mut events,
        );
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn slow_payload_reduces_speed_until_it_expires() {
        // No convoy configured, so the enemy holds position for the shot.
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MountEmplacement {
                armament: Armament {
                    category: WeaponCategory::Cryo,
                    tier: 1,
                },
                position: Vec2::new(200.0, 200.0),
            },
            &mut events,
        );
        let _ = spawn(&mut world, EnemyKind::Crawler, Vec2::new(200.0, 150.0));
        apply(
            &mut world,
            Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(0)),
                target: EnemyId::new(0),
            },
            &mut events,
        );

        // Small steps so the projectile lands inside the contact radius.
        for _ in 0..5 {
            let _ = tick(&mut world, 0.02);
        }
        let view = query::enemy_view(&world);
        let enemy = view.iter().next().expect("slowed enemy survives");
        assert!(enemy.slow_remaining > 0.0);
        assert!(enemy.slow_factor < 1.0);

        // After the slow expires the enemy returns to full speed.
        for _ in 0..20 {
            let _ = tick(&mut world, 0.1);
        }
        let view = query::enemy_view(&world);
        let enemy = view.iter().next().expect("cryo damage does not kill");
        assert_eq!(enemy.slow_factor, 1.0);
        assert_eq!(enemy.slow_remaining, 0.0);
    }

    #[test]
    fn boss_phase_transitions_surface_as_events() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, convoy_at_origin(), &mut events);
        let spec = overrun_system_encounter::generate(
            7,
            2,
            overrun_system_encounter::GenerationConfig::default(),
        );
        apply(
            &mut world,
            Command::SpawnBoss {
                spec,
                position: Vec2::new(600.0, 0.0),
            },
            &mut events,
        );

        let mut saw_transition = false;
        for _ in 0..100 {
            let events = tick(&mut world, 0.1);
            if events
                .iter()
                .any(|event| matches!(event, Event::BossPhaseChanged { .. }))
            {
                saw_transition = true;
                break;
            }
        }
        assert!(saw_transition, "boss telegraph should expire within 10s");
        let (_, instance) = query::boss(&world).expect("boss still alive");
        assert!(instance.hp > 0.0);
    }
}
