#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty curve engine mapping wave indices to bounded stat multipliers.
//!
//! The curve is pure given a wave index and the rubber-band history: the same
//! inputs always produce the same [`WaveScaling`]. Every returned multiplier
//! is finite, at least 1.0, and at most its configured cap for any wave index
//! up to the safety ceiling.

use overrun_core::StatScale;

/// Safety ceiling applied to wave indices before transcendental math.
pub const WAVE_CEILING: u32 = 1_000_000;

/// Largest exponent fed to the exponential curve shape.
const EXPONENT_CAP: f64 = 300.0;

/// Capacity of the rubber-band death history ring.
const DEATH_RING_CAPACITY: usize = 10;

/// Interchangeable curve shapes mapping `(wave, rate)` to a raw multiplier.
pub type CurveFn = fn(wave: f64, rate: f64) -> f64;

/// Built-in curve shapes usable as [`CurveFn`] strategies.
pub mod curves {
    use super::EXPONENT_CAP;

    /// Straight line: `1 + wave × rate`.
    #[must_use]
    pub fn linear(wave: f64, rate: f64) -> f64 {
        1.0 + wave * rate
    }

    /// Compounding growth with the exponent capped to avoid infinities.
    #[must_use]
    pub fn exponential(wave: f64, rate: f64) -> f64 {
        (1.0 + rate).powf(wave.min(EXPONENT_CAP))
    }

    /// Fast early growth that smooths out late: `1 + rate × log10(wave + 9) × sqrt(wave)`.
    #[must_use]
    pub fn log_sqrt(wave: f64, rate: f64) -> f64 {
        1.0 + rate * (wave + 9.0).log10() * wave.sqrt()
    }
}

/// Configuration for the difficulty curve engine.
#[derive(Clone, Copy, Debug)]
pub struct CurveConfig {
    /// Strategy function producing the raw multiplier before capping.
    pub curve: CurveFn,
    /// Growth rate for the hit-point multiplier.
    pub hp_rate: f64,
    /// Growth rate for the damage multiplier.
    pub damage_rate: f64,
    /// Growth rate for the speed multiplier.
    pub speed_rate: f64,
    /// Soft cap for the hit-point multiplier.
    pub hp_cap: f64,
    /// Soft cap for the damage multiplier.
    pub damage_cap: f64,
    /// Soft cap for the speed multiplier.
    pub speed_cap: f64,
    /// Fraction of a cap below which values pass through untouched.
    pub soft_knee: f64,
    /// Trailing wave window inspected for rubber-banding.
    pub rubber_window: u32,
    /// Multiplier applied to hp/damage while rubber-banding is active.
    pub rubber_factor: f64,
    /// Spawn count at wave 1, before logarithmic growth.
    pub spawn_base: u32,
    /// Hard performance ceiling on per-wave spawn counts.
    pub spawn_cap: u32,
    /// Waves between boss encounters.
    pub boss_period: u32,
    /// Waves between elite waves; skipped when a boss wave lands.
    pub elite_period: u32,
    /// Per-wave growth of the elite upgrade probability.
    pub elite_chance_rate: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            curve: curves::log_sqrt,
            hp_rate: 0.12,
            damage_rate: 0.08,
            speed_rate: 0.004,
            hp_cap: 80.0,
            damage_cap: 40.0,
            speed_cap: 2.5,
            soft_knee: 0.75,
            rubber_window: 10,
            rubber_factor: 0.85,
            spawn_base: 4,
            spawn_cap: 48,
            boss_period: 20,
            elite_period: 7,
            elite_chance_rate: 0.002,
        }
    }
}

/// Bounded multipliers and derived wave parameters for one wave index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveScaling {
    /// Hit-point multiplier, rubber-banded.
    pub hp: f64,
    /// Damage multiplier, rubber-banded.
    pub damage: f64,
    /// Speed multiplier; never rubber-banded.
    pub speed: f64,
    /// Number of enemies the spawner should emit this wave.
    pub spawn_count: u32,
    /// Probability that a spawned enemy is upgraded to an elite.
    pub elite_chance: f64,
    /// Whether this wave hosts a boss encounter.
    pub boss_wave: bool,
    /// Whether this wave is an elite wave.
    pub elite_wave: bool,
    /// Score multiplier awarded for kills during this wave.
    pub score_multiplier: f64,
}

impl WaveScaling {
    /// Converts the multipliers into the spawn-request stat tuple.
    #[must_use]
    pub fn stat_scale(&self) -> StatScale {
        StatScale {
            hp: self.hp as f32,
            damage: self.damage as f32,
            speed: self.speed as f32,
        }
    }
}

/// Fixed-capacity ring of recent death waves, bounded over arbitrary runs.
#[derive(Clone, Copy, Debug, Default)]
struct DeathRing {
    waves: [Option<u32>; DEATH_RING_CAPACITY],
    cursor: usize,
}

impl DeathRing {
    fn push(&mut self, wave: u32) {
        self.waves[self.cursor] = Some(wave);
        self.cursor = (self.cursor + 1) % DEATH_RING_CAPACITY;
    }

    fn count_within(&self, wave: u32, window: u32) -> usize {
        let floor = wave.saturating_sub(window);
        self.waves
            .iter()
            .flatten()
            .filter(|death| **death >= floor && **death <= wave)
            .count()
    }
}

/// Difficulty curve engine with rubber-band history.
#[derive(Clone, Debug)]
pub struct Difficulty {
    config: CurveConfig,
    deaths: DeathRing,
    best_wave: u32,
}

impl Difficulty {
    /// Creates a new engine from the provided configuration.
    #[must_use]
    pub fn new(config: CurveConfig) -> Self {
        Self {
            config,
            deaths: DeathRing::default(),
            best_wave: 0,
        }
    }

    /// Records that the player died on the provided wave.
    pub fn record_death(&mut self, wave: u32) {
        self.deaths.push(wave);
    }

    /// Raises the best-wave high-water mark if the run surpassed it.
    pub fn record_best(&mut self, wave: u32) {
        self.best_wave = self.best_wave.max(wave);
    }

    /// Highest wave any run has reached.
    #[must_use]
    pub const fn best_wave(&self) -> u32 {
        self.best_wave
    }

    /// Tier index handed to the encounter factory on boss waves.
    #[must_use]
    pub fn boss_tier(&self, wave: u32) -> u32 {
        wave.min(WAVE_CEILING) / self.config.boss_period.max(1)
    }

    /// Computes bounded multipliers and derived parameters for a wave.
    #[must_use]
    pub fn scaling_for(&self, wave: u32) -> WaveScaling {
        let wave = wave.clamp(1, WAVE_CEILING);
        let wave_f = f64::from(wave);

        let hp_raw = (self.config.curve)(wave_f, self.config.hp_rate);
        let damage_raw = (self.config.curve)(wave_f, self.config.damage_rate);
        let speed_raw = (self.config.curve)(wave_f, self.config.speed_rate);

        let rubber = self.rubber_band(wave);
        let hp = (soft_cap(hp_raw, self.config.hp_cap, self.config.soft_knee) * rubber).max(1.0);
        let damage = (soft_cap(damage_raw, self.config.damage_cap, self.config.soft_knee)
            * rubber)
            .max(1.0);
        let speed = soft_cap(speed_raw, self.config.speed_cap, self.config.soft_knee).max(1.0);

        let boss_wave = wave % self.config.boss_period.max(1) == 0;
        let elite_wave = !boss_wave && wave % self.config.elite_period.max(1) == 0;

        WaveScaling {
            hp,
            damage,
            speed,
            spawn_count: self.spawn_count(wave_f),
            elite_chance: (0.05 + wave_f * self.config.elite_chance_rate).min(0.5),
            boss_wave,
            elite_wave,
            score_multiplier: 1.0 + (hp - 1.0) * 0.5,
        }
    }

    /// Rubber-band factor for the provided wave: 1.0 unless the player died
    /// at least twice inside the trailing window, never above 1.0.
    #[must_use]
    pub fn rubber_band(&self, wave: u32) -> f64 {
        if self.deaths.count_within(wave, self.config.rubber_window) >= 2 {
            self.config.rubber_factor
        } else {
            1.0
        }
    }

    fn spawn_count(&self, wave_f: f64) -> u32 {
        let growth = wave_f.log2().max(0.0) as u32;
        self.config
            .spawn_base
            .saturating_add(growth)
            .min(self.config.spawn_cap)
    }
}

/// Compresses a value smoothly toward `cap` while staying monotonic.
///
/// Values below `cap × knee_fraction` pass through untouched; above the knee
/// the curve approaches the cap asymptotically without ever crossing it.
#[must_use]
pub fn soft_cap(value: f64, cap: f64, knee_fraction: f64) -> f64 {
    let knee = cap * knee_fraction;
    if value <= knee {
        return value;
    }
    let span = cap - knee;
    if span <= 0.0 {
        return cap;
    }
    knee + span * (1.0 - (-(value - knee) / span).exp())
}
