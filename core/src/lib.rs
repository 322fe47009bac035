#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Overrun simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative combat world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for collaborators to react to deterministically. Systems consume immutable
//! snapshot views and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a mounted weapon emplacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmplacementId(u32);

impl EmplacementId {
    /// Creates a new emplacement identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defended convoy segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Creates a new segment identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed catalog of enemy archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow ground swarmer; the baseline threat.
    Crawler,
    /// Fast and fragile flanker.
    Sprinter,
    /// Armored bruiser that soaks projectile damage.
    Brute,
    /// Oversized late-run shambler with heavy contact damage.
    Husk,
}

impl EnemyKind {
    /// Base hit points before difficulty scaling.
    #[must_use]
    pub const fn base_hp(self) -> f32 {
        match self {
            Self::Crawler => 30.0,
            Self::Sprinter => 15.0,
            Self::Brute => 150.0,
            Self::Husk => 320.0,
        }
    }

    /// Base movement speed in world units per second.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Crawler => 80.0,
            Self::Sprinter => 160.0,
            Self::Brute => 40.0,
            Self::Husk => 30.0,
        }
    }

    /// Damage dealt to a convoy segment on contact.
    #[must_use]
    pub const fn base_contact_damage(self) -> f32 {
        match self {
            Self::Crawler => 20.0,
            Self::Sprinter => 10.0,
            Self::Brute => 40.0,
            Self::Husk => 75.0,
        }
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Crawler => 20.0,
            Self::Sprinter => 12.0,
            Self::Brute => 32.0,
            Self::Husk => 44.0,
        }
    }

    /// Flat armor subtracted from incoming projectile damage.
    #[must_use]
    pub const fn armor(self) -> f32 {
        match self {
            Self::Crawler => 0.0,
            Self::Sprinter => 0.0,
            Self::Brute => 20.0,
            Self::Husk => 35.0,
        }
    }
}

/// Closed catalog of player weapon categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponCategory {
    /// High fire rate, low per-shot damage.
    MachineGun,
    /// Slow, hard-hitting shells.
    Cannon,
    /// Armor-piercing slugs with long reach.
    Railgun,
    /// Chilling rounds that slow struck enemies.
    Cryo,
}

impl WeaponCategory {
    /// Every category in deterministic declaration order.
    pub const ALL: [Self; 4] = [Self::MachineGun, Self::Cannon, Self::Railgun, Self::Cryo];
}

/// Slow payload carried by a projectile and applied on hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Multiplier applied to enemy speed while the slow is active.
    pub factor: f32,
    /// Seconds the slow persists after the hit.
    pub duration: f32,
}

/// Derived combat statistics for one weapon at one tier.
///
/// Profiles are a pure function of `(category, tier)` and are never stored on
/// entities; the armory recomputes them on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponProfile {
    /// Raw damage applied before armor reduction.
    pub damage: f32,
    /// Shots per second; cooldown is its reciprocal.
    pub fire_rate: f32,
    /// Maximum projectile travel distance in world units.
    pub range: f32,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
    /// Fraction of enemy armor ignored, clamped to `[0, 0.9]`.
    pub pierce_fraction: f32,
    /// Optional slow payload attached to spawned projectiles.
    pub slow: Option<SlowEffect>,
}

/// Difficulty-scaled stat multipliers attached to a spawn request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatScale {
    /// Multiplier applied to base hit points.
    pub hp: f32,
    /// Multiplier applied to base contact damage.
    pub damage: f32,
    /// Multiplier applied to base movement speed.
    pub speed: f32,
}

impl StatScale {
    /// Identity scaling that leaves base stats untouched.
    pub const IDENTITY: Self = Self {
        hp: 1.0,
        damage: 1.0,
        speed: 1.0,
    };
}

/// Seed describing one defended convoy segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSeed {
    /// Identifier the external defense collaborator uses for the segment.
    pub id: SegmentId,
    /// Center of the segment in world units.
    pub position: Vec2,
    /// Collision radius of the segment.
    pub radius: f32,
    /// Hit points the segment starts with.
    pub hp: f32,
}

/// Weapon fitted to an emplacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Armament {
    /// Category of the mounted weapon.
    pub category: WeaponCategory,
    /// Authored or extrapolated tier, starting at 1.
    pub tier: u32,
}

/// Identifies which weapon a fire command addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireSource {
    /// A car-mounted turret emplacement.
    Turret(EmplacementId),
    /// The vehicle's composite weapon, ranked from the mounted turrets.
    Composite,
}

/// Boss body archetype drawn from the fixed polygon catalog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossBody {
    /// Number of polygon sides in the silhouette.
    pub sides: u32,
    /// Number of armor plates distributed around the hull.
    pub armor_plates: u32,
    /// Hull radius in world units.
    pub size: f32,
}

/// Weapon mount kinds available to generated bosses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossMountKind {
    /// Slow heavy shells.
    Cannon,
    /// Fast low-damage stream.
    Rapid,
    /// Long-range focused beam.
    Beam,
}

/// One weapon mount on a generated boss.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossMount {
    /// Mount archetype.
    pub kind: BossMountKind,
    /// Raw damage per shot.
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Maximum reach in world units.
    pub range: f32,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
}

/// Semantic tags for boss behavior phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Face the target and drive straight at it.
    Charge,
    /// Orbit the target at a fixed radius.
    Sweep,
    /// Hold position and unload the mounted weapons.
    Burst,
    /// Hold position and expose a minion-summon cooldown.
    Summon,
}

/// One authored-at-generation behavior phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossPhaseSpec {
    /// Behavior executed while the phase runs.
    pub kind: PhaseKind,
    /// Seconds the execute state lasts.
    pub duration: f32,
    /// Seconds of telegraph before the behavior starts.
    pub telegraph: f32,
    /// Movement speed used by the phase behavior.
    pub move_speed: f32,
}

/// Localized region on the boss hull granting bonus damage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeakPoint {
    /// Angle of the weak point relative to the hull, in radians.
    pub angle: f32,
    /// Radius of the vulnerable region in world units.
    pub radius: f32,
    /// Damage multiplier applied when the region is struck.
    pub multiplier: f32,
}

/// Immutable boss configuration produced once per encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossSpec {
    body: BossBody,
    max_hp: f32,
    contact_damage: f32,
    mounts: Vec<BossMount>,
    phases: Vec<BossPhaseSpec>,
    weak_points: Vec<WeakPoint>,
}

impl BossSpec {
    /// Assembles a boss specification, asserting the catalog bounds.
    ///
    /// An out-of-bounds mount, phase, or weak-point count signals a broken
    /// generator and is treated as a defect rather than a recoverable error.
    #[must_use]
    pub fn new(
        body: BossBody,
        max_hp: f32,
        contact_damage: f32,
        mounts: Vec<BossMount>,
        phases: Vec<BossPhaseSpec>,
        weak_points: Vec<WeakPoint>,
    ) -> Self {
        assert!(
            (1..=3).contains(&mounts.len()),
            "boss spec requires 1..=3 mounts"
        );
        assert!(
            (3..=4).contains(&phases.len()),
            "boss spec requires 3..=4 phases"
        );
        assert!(weak_points.len() <= 2, "boss spec allows at most 2 weak points");
        assert!(max_hp > 0.0, "boss spec requires positive hp");
        Self {
            body,
            max_hp,
            contact_damage,
            mounts,
            phases,
            weak_points,
        }
    }

    /// Hull archetype of the boss.
    #[must_use]
    pub const fn body(&self) -> BossBody {
        self.body
    }

    /// Maximum hit points of the boss.
    #[must_use]
    pub const fn max_hp(&self) -> f32 {
        self.max_hp
    }

    /// Damage the boss deals on contact.
    #[must_use]
    pub const fn contact_damage(&self) -> f32 {
        self.contact_damage
    }

    /// Weapon mounts carried by the boss.
    #[must_use]
    pub fn mounts(&self) -> &[BossMount] {
        &self.mounts
    }

    /// Behavior phases cycled by the state machine.
    #[must_use]
    pub fn phases(&self) -> &[BossPhaseSpec] {
        &self.phases
    }

    /// Weak points placed on the hull.
    #[must_use]
    pub fn weak_points(&self) -> &[WeakPoint] {
        &self.weak_points
    }
}

/// Sub-state of the boss behavior cycle within the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseState {
    /// Wind-up that signals the upcoming behavior.
    Telegraph,
    /// The phase behavior is running.
    Execute,
    /// Fixed cooldown before the next phase begins.
    Recover,
}

/// Mutable runtime state of an active boss encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct BossInstance {
    /// Current hull position.
    pub position: Vec2,
    /// Current hull rotation in radians.
    pub rotation: f32,
    /// Remaining hit points.
    pub hp: f32,
    /// Index into the specification's phase list.
    pub phase_index: usize,
    /// Sub-state within the current phase.
    pub state: PhaseState,
    /// Seconds remaining in the current sub-state.
    pub state_timer: f32,
    /// Orbit angle used by sweep phases, in radians.
    pub orbit_angle: f32,
    /// Seconds until an external spawner may summon a minion.
    pub summon_cooldown: f32,
}

impl BossInstance {
    /// Creates a fresh instance positioned for the encounter's first phase.
    #[must_use]
    pub fn from_spec(spec: &BossSpec, position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            hp: spec.max_hp(),
            phase_index: 0,
            state: PhaseState::Telegraph,
            state_timer: spec.phases()[0].telegraph,
            orbit_angle: 0.0,
            summon_cooldown: 0.0,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the defended convoy segments with the provided seeds.
    ConfigureConvoy {
        /// Segment descriptors supplied by the defense collaborator.
        segments: Vec<SegmentSeed>,
    },
    /// Places the vehicle and its composite weapon in the world.
    ConfigureVehicle {
        /// Vehicle position in world units.
        position: Vec2,
        /// Unit heading the composite weapon fires along.
        heading: Vec2,
    },
    /// Mounts a turret emplacement at a fixed world position.
    MountEmplacement {
        /// Weapon fitted to the new emplacement.
        armament: Armament,
        /// World position of the emplacement.
        position: Vec2,
    },
    /// Spawns one enemy with difficulty-scaled stats.
    SpawnEnemy {
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// World position the enemy appears at.
        position: Vec2,
        /// Stat multipliers computed by the difficulty curve.
        scale: StatScale,
    },
    /// Spawns a generated boss encounter.
    SpawnBoss {
        /// Immutable specification produced by the encounter factory.
        spec: BossSpec,
        /// World position the boss appears at.
        position: Vec2,
    },
    /// Requests that a ready weapon fire at a live enemy.
    FireWeapon {
        /// Weapon that should fire.
        source: FireSource,
        /// Enemy the shot is aimed at.
        target: EnemyId,
    },
    /// Applies flat damage to every enemy within a radius.
    AreaDamage {
        /// Center of the explosion.
        center: Vec2,
        /// Radius of the affected disc.
        radius: f32,
        /// Flat damage applied to each enemy inside.
        damage: f32,
    },
    /// Applies flat damage to every live enemy unconditionally.
    BurstDamage {
        /// Flat damage applied to each enemy.
        damage: f32,
    },
    /// Discards all enemies, projectiles, and any active boss without
    /// emitting kill events.
    Clear,
}

/// Events broadcast by the world after processing commands.
///
/// The out-parameter event vector is the subscription surface: presentation
/// collaborators read emitted events after each apply, and the simulation
/// never waits on them.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports contact damage applied to a convoy segment.
    DefenseHit {
        /// Segment that absorbed the hit.
        segment: SegmentId,
        /// Damage applied to the segment.
        damage: f32,
        /// Hit points the segment retains after the hit.
        remaining: f32,
        /// World-space impact point of the collision.
        impact: Vec2,
        /// Archetype of the enemy that collided.
        source: EnemyKind,
    },
    /// Confirms that an enemy was destroyed by weapon damage.
    EnemyDestroyed {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Archetype of the destroyed enemy.
        kind: EnemyKind,
        /// Position the enemy occupied when it died.
        position: Vec2,
    },
    /// Confirms that a weapon fired a projectile.
    WeaponFired {
        /// Weapon that fired.
        source: FireSource,
        /// Category of the projectile that was spawned.
        category: WeaponCategory,
    },
    /// Announces that the boss advanced to a new phase sub-state.
    BossPhaseChanged {
        /// Index of the phase now active.
        phase: usize,
        /// Sub-state the machine entered.
        state: PhaseState,
    },
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Current world position.
    pub position: Vec2,
    /// Facing angle in radians.
    pub rotation: f32,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points the enemy spawned with.
    pub max_hp: f32,
    /// Effective movement speed before slow effects.
    pub speed: f32,
    /// Damage dealt to a segment on contact.
    pub contact_damage: f32,
    /// Collision radius.
    pub radius: f32,
    /// Flat armor against projectile damage.
    pub armor: f32,
    /// Seconds remaining on the active slow, zero when unslowed.
    pub slow_remaining: f32,
    /// Speed multiplier while the slow is active.
    pub slow_factor: f32,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Category of the weapon that fired it.
    pub category: WeaponCategory,
    /// Current world position.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Distance travelled so far.
    pub travelled: f32,
    /// Travel budget before the projectile despawns.
    pub range: f32,
    /// Raw damage applied before armor reduction.
    pub damage: f32,
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live projectiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a turret emplacement used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmplacementSnapshot {
    /// Identifier allocated to the emplacement by the world.
    pub id: EmplacementId,
    /// Weapon fitted to the emplacement.
    pub armament: Armament,
    /// World position of the emplacement.
    pub position: Vec2,
    /// Seconds until the weapon may fire again, zero when ready.
    pub ready_in: f32,
}

/// Read-only snapshot describing all turret emplacements.
#[derive(Clone, Debug, Default)]
pub struct EmplacementView {
    snapshots: Vec<EmplacementSnapshot>,
}

impl EmplacementView {
    /// Creates a new emplacement view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EmplacementSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &EmplacementSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether the view captured no emplacements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EmplacementSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the vehicle and its composite weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleSnapshot {
    /// Vehicle position in world units.
    pub position: Vec2,
    /// Unit heading the composite weapon fires along.
    pub heading: Vec2,
    /// Seconds until the composite weapon may fire again.
    pub ready_in: f32,
}

/// Immutable representation of a defended convoy segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSnapshot {
    /// Identifier of the segment.
    pub id: SegmentId,
    /// Center of the segment in world units.
    pub position: Vec2,
    /// Collision radius of the segment.
    pub radius: f32,
    /// Remaining hit points.
    pub hp: f32,
}

/// Read-only snapshot describing the convoy.
#[derive(Clone, Debug, Default)]
pub struct SegmentView {
    snapshots: Vec<SegmentSnapshot>,
}

impl SegmentView {
    /// Creates a new segment view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SegmentSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether the view captured no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<SegmentSnapshot> {
        self.snapshots
    }
}
