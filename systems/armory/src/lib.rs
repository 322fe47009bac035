#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure weapon-profile resolution for turrets and the composite weapon.
//!
//! Profiles are derived, never stored: turret stats come from an authored
//! per-tier table and are linearly extrapolated beyond it, while the
//! composite vehicle weapon is ranked from the currently mounted turrets
//! every time it is queried so no stale cached state can survive a remount.

use overrun_core::{EmplacementView, SlowEffect, WeaponCategory, WeaponProfile};

/// Number of authored tiers per category; higher tiers extrapolate.
pub const AUTHORED_TIERS: u32 = 3;

/// Upper bound for probability-like profile fields.
const PROBABILITY_CAP: f32 = 0.9;

const MACHINE_GUN: [WeaponProfile; 3] = [
    WeaponProfile {
        damage: 8.0,
        fire_rate: 5.0,
        range: 420.0,
        projectile_speed: 600.0,
        pierce_fraction: 0.0,
        slow: None,
    },
    WeaponProfile {
        damage: 12.0,
        fire_rate: 6.0,
        range: 450.0,
        projectile_speed: 620.0,
        pierce_fraction: 0.0,
        slow: None,
    },
    WeaponProfile {
        damage: 16.0,
        fire_rate: 7.0,
        range: 480.0,
        projectile_speed: 640.0,
        pierce_fraction: 0.0,
        slow: None,
    },
];

const CANNON: [WeaponProfile; 3] = [
    WeaponProfile {
        damage: 40.0,
        fire_rate: 0.8,
        range: 520.0,
        projectile_speed: 420.0,
        pierce_fraction: 0.2,
        slow: None,
    },
    WeaponProfile {
        damage: 60.0,
        fire_rate: 0.9,
        range: 560.0,
        projectile_speed: 440.0,
        pierce_fraction: 0.25,
        slow: None,
    },
    WeaponProfile {
        damage: 80.0,
        fire_rate: 1.0,
        range: 600.0,
        projectile_speed: 460.0,
        pierce_fraction: 0.3,
        slow: None,
    },
];

const RAILGUN: [WeaponProfile; 3] = [
    WeaponProfile {
        damage: 30.0,
        fire_rate: 1.2,
        range: 700.0,
        projectile_speed: 900.0,
        pierce_fraction: 0.5,
        slow: None,
    },
    WeaponProfile {
        damage: 45.0,
        fire_rate: 1.3,
        range: 760.0,
        projectile_speed: 950.0,
        pierce_fraction: 0.6,
        slow: None,
    },
    WeaponProfile {
        damage: 60.0,
        fire_rate: 1.4,
        range: 820.0,
        projectile_speed: 1_000.0,
        pierce_fraction: 0.7,
        slow: None,
    },
];

const CRYO: [WeaponProfile; 3] = [
    WeaponProfile {
        damage: 10.0,
        fire_rate: 2.0,
        range: 380.0,
        projectile_speed: 500.0,
        pierce_fraction: 0.0,
        slow: Some(SlowEffect {
            factor: 0.7,
            duration: 1.5,
        }),
    },
    WeaponProfile {
        damage: 14.0,
        fire_rate: 2.2,
        range: 400.0,
        projectile_speed: 520.0,
        pierce_fraction: 0.0,
        slow: Some(SlowEffect {
            factor: 0.6,
            duration: 2.0,
        }),
    },
    WeaponProfile {
        damage: 18.0,
        fire_rate: 2.4,
        range: 420.0,
        projectile_speed: 540.0,
        pierce_fraction: 0.0,
        slow: Some(SlowEffect {
            factor: 0.5,
            duration: 2.5,
        }),
    },
];

fn authored_table(category: WeaponCategory) -> &'static [WeaponProfile; 3] {
    match category {
        WeaponCategory::MachineGun => &MACHINE_GUN,
        WeaponCategory::Cannon => &CANNON,
        WeaponCategory::Railgun => &RAILGUN,
        WeaponCategory::Cryo => &CRYO,
    }
}

/// Resolves the turret profile for a category and tier.
///
/// Tiers within the authored table are returned verbatim. Tiers beyond it
/// are linearly extrapolated from the last two authored tiers, with
/// probability-like fields clamped into `[0, 0.9]`. Tier zero signals a
/// configuration bug and panics.
#[must_use]
pub fn profile(category: WeaponCategory, tier: u32) -> WeaponProfile {
    assert!(tier >= 1, "weapon tier starts at 1");
    let table = authored_table(category);
    if tier <= AUTHORED_TIERS {
        return table[(tier - 1) as usize];
    }

    let last = table[(AUTHORED_TIERS - 1) as usize];
    let prev = table[(AUTHORED_TIERS - 2) as usize];
    let steps = (tier - AUTHORED_TIERS) as f32;

    let slow = match (last.slow, prev.slow) {
        (Some(last_slow), Some(prev_slow)) => Some(SlowEffect {
            factor: clamp_probability(
                last_slow.factor + (last_slow.factor - prev_slow.factor) * steps,
            ),
            duration: (last_slow.duration + (last_slow.duration - prev_slow.duration) * steps)
                .max(0.0),
        }),
        (slow, _) => slow,
    };

    WeaponProfile {
        damage: extrapolate(last.damage, prev.damage, steps),
        fire_rate: extrapolate(last.fire_rate, prev.fire_rate, steps),
        range: extrapolate(last.range, prev.range, steps),
        projectile_speed: extrapolate(last.projectile_speed, prev.projectile_speed, steps),
        pierce_fraction: clamp_probability(extrapolate(
            last.pierce_fraction,
            prev.pierce_fraction,
            steps,
        )),
        slow,
    }
}

fn extrapolate(last: f32, prev: f32, steps: f32) -> f32 {
    last + (last - prev) * steps
}

fn clamp_probability(value: f32) -> f32 {
    value.clamp(0.0, PROBABILITY_CAP)
}

/// Tier of the composite vehicle weapon; only three ever exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompositeTier {
    /// Default tier for any mounted count below the first threshold.
    Mk1,
    /// Reached once the winning category hits the first threshold.
    Mk2,
    /// Reached once the winning category hits the second threshold.
    Mk3,
}

/// Mount-count thresholds that promote the composite weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeThresholds {
    mk2_at: u32,
    mk3_at: u32,
}

impl CompositeThresholds {
    /// Creates thresholds, asserting they are ordered and non-zero.
    #[must_use]
    pub fn new(mk2_at: u32, mk3_at: u32) -> Self {
        assert!(
            0 < mk2_at && mk2_at < mk3_at,
            "composite thresholds must satisfy 0 < mk2 < mk3"
        );
        Self { mk2_at, mk3_at }
    }

    fn tier_for(self, count: u32) -> CompositeTier {
        if count >= self.mk3_at {
            CompositeTier::Mk3
        } else if count >= self.mk2_at {
            CompositeTier::Mk2
        } else {
            CompositeTier::Mk1
        }
    }
}

impl Default for CompositeThresholds {
    fn default() -> Self {
        Self::new(3, 6)
    }
}

/// Result of ranking the mounted turrets for the composite weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeRating {
    /// Category that won the ranking.
    pub category: WeaponCategory,
    /// Tier the winning mount count maps to.
    pub tier: CompositeTier,
}

/// Ranks the mounted turrets and derives the composite weapon rating.
///
/// The most numerous category wins; ties break toward the category that
/// appears first in the view's deterministic iteration order. Returns `None`
/// when no turrets are mounted, which callers treat as a no-op.
#[must_use]
pub fn composite_rating(
    emplacements: &EmplacementView,
    thresholds: CompositeThresholds,
) -> Option<CompositeRating> {
    let mut counts: Vec<(WeaponCategory, u32, usize)> = Vec::new();
    for (index, snapshot) in emplacements.iter().enumerate() {
        let category = snapshot.armament.category;
        match counts.iter_mut().find(|entry| entry.0 == category) {
            Some(entry) => entry.1 += 1,
            None => counts.push((category, 1, index)),
        }
    }

    let winner = counts.into_iter().max_by(|a, b| {
        // Higher count wins; at equal count the earlier first occurrence wins.
        a.1.cmp(&b.1).then(b.2.cmp(&a.2))
    })?;

    Some(CompositeRating {
        category: winner.0,
        tier: thresholds.tier_for(winner.1),
    })
}

/// Resolves the fixed composite profile for a category and tier.
///
/// The composite table is authored in full; no extrapolation exists because
/// only three tiers are ever reachable.
#[must_use]
pub fn composite_profile(category: WeaponCategory, tier: CompositeTier) -> WeaponProfile {
    let index = match tier {
        CompositeTier::Mk1 => 0,
        CompositeTier::Mk2 => 1,
        CompositeTier::Mk3 => 2,
    };
    COMPOSITE_TABLES[composite_index(category)][index]
}

fn composite_index(category: WeaponCategory) -> usize {
    match category {
        WeaponCategory::MachineGun => 0,
        WeaponCategory::Cannon => 1,
        WeaponCategory::Railgun => 2,
        WeaponCategory::Cryo => 3,
    }
}

const COMPOSITE_TABLES: [[WeaponProfile; 3]; 4] = [
    // MachineGun
    [
        WeaponProfile {
            damage: 14.0,
            fire_rate: 6.0,
            range: 460.0,
            projectile_speed: 640.0,
            pierce_fraction: 0.0,
            slow: None,
        },
        WeaponProfile {
            damage: 22.0,
            fire_rate: 7.5,
            range: 500.0,
            projectile_speed: 660.0,
            pierce_fraction: 0.0,
            slow: None,
        },
        WeaponProfile {
            damage: 32.0,
            fire_rate: 9.0,
            range: 540.0,
            projectile_speed: 680.0,
            pierce_fraction: 0.0,
            slow: None,
        },
    ],
    // Cannon
    [
        WeaponProfile {
            damage: 60.0,
            fire_rate: 0.9,
            range: 560.0,
            projectile_speed: 440.0,
            pierce_fraction: 0.25,
            slow: None,
        },
        WeaponProfile {
            damage: 95.0,
            fire_rate: 1.0,
            range: 620.0,
            projectile_speed: 460.0,
            pierce_fraction: 0.3,
            slow: None,
        },
        WeaponProfile {
            damage: 140.0,
            fire_rate: 1.1,
            range: 680.0,
            projectile_speed: 480.0,
            pierce_fraction: 0.35,
            slow: None,
        },
    ],
    // Railgun
    [
        WeaponProfile {
            damage: 48.0,
            fire_rate: 1.3,
            range: 760.0,
            projectile_speed: 950.0,
            pierce_fraction: 0.6,
            slow: None,
        },
        WeaponProfile {
            damage: 72.0,
            fire_rate: 1.4,
            range: 840.0,
            projectile_speed: 1_000.0,
            pierce_fraction: 0.7,
            slow: None,
        },
        WeaponProfile {
            damage: 105.0,
            fire_rate: 1.5,
            range: 920.0,
            projectile_speed: 1_050.0,
            pierce_fraction: 0.8,
            slow: None,
        },
    ],
    // Cryo
    [
        WeaponProfile {
            damage: 16.0,
            fire_rate: 2.4,
            range: 420.0,
            projectile_speed: 540.0,
            pierce_fraction: 0.0,
            slow: Some(SlowEffect {
                factor: 0.6,
                duration: 2.0,
            }),
        },
        WeaponProfile {
            damage: 24.0,
            fire_rate: 2.7,
            range: 460.0,
            projectile_speed: 560.0,
            pierce_fraction: 0.0,
            slow: Some(SlowEffect {
                factor: 0.5,
                duration: 2.5,
            }),
        },
        WeaponProfile {
            damage: 34.0,
            fire_rate: 3.0,
            range: 500.0,
            projectile_speed: 580.0,
            pierce_fraction: 0.0,
            slow: Some(SlowEffect {
                factor: 0.4,
                duration: 3.0,
            }),
        },
    ],
];
