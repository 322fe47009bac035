#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure fire-control system that turns snapshots into fire commands.
//!
//! Every ready weapon independently picks the closest live enemy by squared
//! distance inside its profile range and queues a [`Command::FireWeapon`].
//! The composite vehicle weapon additionally restricts candidates to a
//! forward cone around the vehicle heading. Absent enemies, absent
//! emplacements, and cooling weapons are all silent no-ops.

use glam::Vec2;
use overrun_core::{
    Command, EmplacementView, EnemyId, EnemyView, FireSource, VehicleSnapshot,
};
use overrun_system_armory::{composite_profile, composite_rating, CompositeThresholds};

/// Configuration for the fire-control pass.
#[derive(Clone, Copy, Debug)]
pub struct FireControlConfig {
    /// Minimum dot product between heading and target offset for the
    /// composite weapon; 0.5 corresponds to a 120-degree total cone.
    pub cone_threshold: f32,
    /// Mount-count thresholds forwarded to the composite ranking.
    pub composite_thresholds: CompositeThresholds,
}

impl Default for FireControlConfig {
    fn default() -> Self {
        Self {
            cone_threshold: 0.5,
            composite_thresholds: CompositeThresholds::default(),
        }
    }
}

/// Fire-control system that reuses scratch buffers across ticks.
#[derive(Debug, Default)]
pub struct FireControl {
    candidates: Vec<Candidate>,
}

impl FireControl {
    /// Creates a new fire-control system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireWeapon` entries for every ready weapon with a
    /// target in range.
    pub fn handle(
        &mut self,
        emplacements: &EmplacementView,
        vehicle: Option<&VehicleSnapshot>,
        enemies: &EnemyView,
        config: &FireControlConfig,
        out: &mut Vec<Command>,
    ) {
        if enemies.is_empty() {
            return;
        }

        self.candidates.clear();
        self.candidates.reserve(enemies.len());
        for snapshot in enemies.iter() {
            self.candidates.push(Candidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }

        for emplacement in emplacements.iter() {
            if emplacement.ready_in > 0.0 {
                continue;
            }
            let profile = overrun_system_armory::profile(
                emplacement.armament.category,
                emplacement.armament.tier,
            );
            if let Some(target) =
                closest_in_range(&self.candidates, emplacement.position, profile.range, None)
            {
                out.push(Command::FireWeapon {
                    source: FireSource::Turret(emplacement.id),
                    target,
                });
            }
        }

        let Some(vehicle) = vehicle else {
            return;
        };
        if vehicle.ready_in > 0.0 {
            return;
        }
        let Some(rating) = composite_rating(emplacements, config.composite_thresholds) else {
            return;
        };
        let profile = composite_profile(rating.category, rating.tier);
        let cone = ForwardCone {
            heading: vehicle.heading,
            threshold: config.cone_threshold,
        };
        if let Some(target) = closest_in_range(
            &self.candidates,
            vehicle.position,
            profile.range,
            Some(cone),
        ) {
            out.push(Command::FireWeapon {
                source: FireSource::Composite,
                target,
            });
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: EnemyId,
    position: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct ForwardCone {
    heading: Vec2,
    threshold: f32,
}

impl ForwardCone {
    fn contains(&self, origin: Vec2, target: Vec2) -> bool {
        let offset = target - origin;
        let length = offset.length();
        if length <= f32::EPSILON {
            return true;
        }
        (offset / length).dot(self.heading) >= self.threshold
    }
}

/// Picks the closest candidate by squared distance inside `range`.
///
/// Candidates arrive in ascending id order, so the strict comparison keeps
/// the smaller [`EnemyId`] when two enemies are equally distant.
fn closest_in_range(
    candidates: &[Candidate],
    origin: Vec2,
    range: f32,
    cone: Option<ForwardCone>,
) -> Option<EnemyId> {
    let range_sq = range * range;
    let mut best: Option<(f32, EnemyId)> = None;

    for candidate in candidates {
        if let Some(cone) = cone {
            if !cone.contains(origin, candidate.position) {
                continue;
            }
        }
        let distance_sq = origin.distance_squared(candidate.position);
        if distance_sq > range_sq {
            continue;
        }
        match best {
            Some((best_distance, _)) if distance_sq >= best_distance => {}
            _ => best = Some((distance_sq, candidate.id)),
        }
    }

    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overrun_core::{
        Armament, EmplacementId, EmplacementSnapshot, EnemyKind, EnemySnapshot, WeaponCategory,
    };

    fn enemy(id: u32, position: Vec2) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Crawler,
            position,
            rotation: 0.0,
            hp: 30.0,
            max_hp: 30.0,
            speed: 80.0,
            contact_damage: 20.0,
            radius: 20.0,
            armor: 0.0,
            slow_remaining: 0.0,
            slow_factor: 1.0,
        }
    }

    fn turret(id: u32, position: Vec2, ready_in: f32) -> EmplacementSnapshot {
        EmplacementSnapshot {
            id: EmplacementId::new(id),
            armament: Armament {
                category: WeaponCategory::MachineGun,
                tier: 1,
            },
            position,
            ready_in,
        }
    }

    fn vehicle(heading: Vec2) -> VehicleSnapshot {
        VehicleSnapshot {
            position: Vec2::ZERO,
            heading,
            ready_in: 0.0,
        }
    }

    #[test]
    fn ready_turret_targets_the_closest_enemy() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(1, Vec2::new(300.0, 0.0)),
            enemy(2, Vec2::new(100.0, 0.0)),
        ]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            None,
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(1)),
                target: EnemyId::new(2),
            }],
        );
    }

    #[test]
    fn cooling_turret_stays_silent() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.4)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(100.0, 0.0))]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            None,
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn enemy_beyond_profile_range_is_ignored() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.0)]);
        // Tier-1 machine gun reaches 420 units.
        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(421.0, 0.0))]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            None,
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn equal_distances_prefer_the_smaller_enemy_id() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(8, Vec2::new(0.0, 120.0)),
            enemy(3, Vec2::new(120.0, 0.0)),
        ]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            None,
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::FireWeapon {
                source: FireSource::Turret(EmplacementId::new(1)),
                target: EnemyId::new(3),
            }],
        );
    }

    #[test]
    fn composite_requires_a_forward_cone_match() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.5)]);
        // Directly behind the vehicle: dot = -1 < threshold.
        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(-100.0, 0.0))]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            Some(&vehicle(Vec2::X)),
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );
        assert!(out.is_empty());

        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(100.0, 0.0))]);
        system.handle(
            &emplacements,
            Some(&vehicle(Vec2::X)),
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::FireWeapon {
                source: FireSource::Composite,
                target: EnemyId::new(1),
            }],
        );
    }

    #[test]
    fn composite_without_mounted_turrets_is_a_no_op() {
        let mut system = FireControl::new();
        let emplacements = EmplacementView::from_snapshots(Vec::new());
        let enemies = EnemyView::from_snapshots(vec![enemy(1, Vec2::new(100.0, 0.0))]);
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            Some(&vehicle(Vec2::X)),
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn empty_enemy_view_is_a_no_op() {
        let mut system = FireControl::new();
        let emplacements =
            EmplacementView::from_snapshots(vec![turret(1, Vec2::ZERO, 0.0)]);
        let enemies = EnemyView::from_snapshots(Vec::new());
        let mut out = Vec::new();

        system.handle(
            &emplacements,
            Some(&vehicle(Vec2::X)),
            &enemies,
            &FireControlConfig::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }
}
