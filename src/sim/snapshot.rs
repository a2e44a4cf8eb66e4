//! Read-only view of the session for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::physics::ship_hull;
use super::state::{GamePhase, GameState, HazardSize, ParticleTint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub heading: f32,
    /// Nose, left wing, right wing
    pub hull: [Vec2; 3],
    pub thrusting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardView {
    pub pos: Vec2,
    pub heading: f32,
    pub size: HazardSize,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    /// 1 when fresh, 0 when about to expire
    pub fade: f32,
    pub tint: ParticleTint,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub high_score: u64,
    pub high_score_wave: u32,
    /// Seconds until the next wave appears
    pub wave_timer: f32,
    /// Seconds until respawn input is accepted
    pub spawn_cooldown: f32,
    pub menu_cursor: usize,
    pub display_scale: u8,
    /// Present only while the ship is in play
    pub ship: Option<ShipView>,
    pub bullets: Vec<Vec2>,
    pub hazards: Vec<HazardView>,
    pub particles: Vec<ParticleView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let ship = (self.phase == GamePhase::Playing).then(|| ShipView {
            pos: self.ship.pos,
            heading: self.ship.heading,
            hull: ship_hull(&self.ship),
            thrusting: self.thrusting,
        });

        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            wave: self.wave,
            high_score: self.best.score,
            high_score_wave: self.best.wave,
            wave_timer: self.wave_timer,
            spawn_cooldown: self.spawn_cooldown,
            menu_cursor: self.menu_cursor,
            display_scale: self.display_scale,
            ship,
            bullets: self.bullets.iter().map(|b| b.pos).collect(),
            hazards: self
                .hazards
                .iter()
                .map(|h| HazardView {
                    pos: h.pos,
                    heading: h.heading,
                    size: h.size,
                    radius: h.radius(),
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    fade: p.fade(),
                    tint: p.tint,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::population::Live;
    use crate::sim::state::{Bullet, Hazard};
    use crate::tuning::Tuning;

    #[test]
    fn test_ship_hidden_outside_play() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(state.snapshot().ship.is_none());

        state.phase = GamePhase::Playing;
        let ship = state.snapshot().ship.expect("ship visible while playing");
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.hull[0], Vec2::new(400.0, 290.0));

        state.phase = GamePhase::WaitingToSpawn;
        assert!(state.snapshot().ship.is_none());
    }

    #[test]
    fn test_snapshot_skips_dead_records() {
        let mut state = GameState::new(1, Tuning::default());
        state.hazards.push(Hazard::new(
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
            HazardSize::Medium,
        ));
        state.bullets.push(Bullet {
            pos: Vec2::new(5.0, 5.0),
            vel: Vec2::ZERO,
            alive: true,
        });
        state.bullets.iter_mut().for_each(|b| b.kill());

        let snapshot = state.snapshot();
        assert!(snapshot.bullets.is_empty());
        assert_eq!(snapshot.hazards.len(), 1);
        assert_eq!(snapshot.hazards[0].radius, 20.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1, Tuning::default());
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
