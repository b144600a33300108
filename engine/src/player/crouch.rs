//! Player Crouch System
//!
//! Tracks whether the character is standing or crouched and, when the config
//! asks for it, resizes the capsule to match.
//!
//! # Heights
//!
//! - Standing: `standing_height` (2.0m by default)
//! - Crouching: `crouch_height` (1.0m by default)
//!
//! Resizing is instant. Standing up is refused while something sits above the
//! head closer than the standing height; the capsule stays short until there
//! is room.
//!
//! # Usage
//!
//! ```rust,ignore
//! use player_move_engine::player::{StanceController, Stance};
//!
//! let mut stance = StanceController::new();
//!
//! // Each frame:
//! stance.update(crouch_branch_active, &mut body, &scene, &config);
//! let crouched = stance.stance() == Stance::Crouching;
//! ```

use glam::Vec3;
use log::warn;

use crate::physics::{CharacterBody, SceneQuery};

use super::config::MovementConfig;

/// Player stance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    /// Capsule height for this stance under `config`.
    pub fn height(&self, config: &MovementConfig) -> f32 {
        match self {
            Stance::Standing => config.standing_height,
            Stance::Crouching => config.crouch_height,
        }
    }
}

/// Manages the crouch stance and capsule height.
#[derive(Debug, Clone, Default)]
pub struct StanceController {
    stance: Stance,

    /// Last stand-up attempt hit an obstacle
    blocked: bool,
}

impl StanceController {
    /// Create a new controller in standing stance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }

    /// Whether the character wants to stand but has no room.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Free vertical space from the feet up, capped at `max_height`.
    ///
    /// # Arguments
    /// * `body` - The character, at its current height
    /// * `scene` - World to probe
    /// * `max_height` - Stop looking past this much clearance
    pub fn clearance_above<B, S>(body: &B, scene: &S, max_height: f32) -> f32
    where
        B: CharacterBody + ?Sized,
        S: SceneQuery + ?Sized,
    {
        let half = body.height() * 0.5;
        let reach = (max_height - half).max(0.0);
        match scene.raycast(body.position(), Vec3::Y, reach) {
            Some(hit) => half + hit.distance,
            None => max_height,
        }
    }

    /// Check if there is enough room to stand.
    ///
    /// # Returns
    /// `true` if `clearance_above` is at least the standing height
    pub fn can_stand(&self, clearance_above: f32, config: &MovementConfig) -> bool {
        clearance_above >= config.standing_height
    }

    /// Apply this frame's crouch request.
    ///
    /// # Arguments
    /// * `wants_crouch` - The crouch branch of the speed blend is active
    /// * `body` - Capsule to resize when `crouch_shrinks_height` is set
    /// * `scene` - Used to look for obstacles before standing up
    ///
    /// # Returns
    /// The stance after this frame
    pub fn update<B, S>(
        &mut self,
        wants_crouch: bool,
        body: &mut B,
        scene: &S,
        config: &MovementConfig,
    ) -> Stance
    where
        B: CharacterBody + ?Sized,
        S: SceneQuery + ?Sized,
    {
        if wants_crouch {
            self.stance = Stance::Crouching;
            self.blocked = false;
        } else if self.stance == Stance::Crouching && config.crouch_shrinks_height {
            let clearance = Self::clearance_above(body, scene, config.standing_height);
            if self.can_stand(clearance, config) {
                self.stance = Stance::Standing;
                self.blocked = false;
            } else {
                if !self.blocked {
                    warn!(
                        "cannot stand up: {:.2}m of clearance, need {:.2}m",
                        clearance, config.standing_height
                    );
                }
                self.blocked = true;
            }
        } else {
            self.stance = Stance::Standing;
        }

        if config.crouch_shrinks_height {
            body.set_height(self.stance.height(config));
        }
        self.stance
    }

    /// Return to standing without touching a body.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Block, KinematicCapsule, StaticWorld};
    use std::sync::Arc;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn open_world() -> Arc<StaticWorld> {
        Arc::new(StaticWorld::flat(0.0))
    }

    /// Flat floor with a ceiling slab whose underside is at `height`.
    fn low_ceiling_world(height: f32) -> Arc<StaticWorld> {
        let slab = Block::new(
            Vec3::new(-5.0, height, -5.0),
            Vec3::new(5.0, height + 1.0, 5.0),
        );
        Arc::new(StaticWorld::flat(0.0).with_block(slab))
    }

    #[test]
    fn test_stance_heights() {
        let config = MovementConfig::double_jump();
        assert!(approx_eq(Stance::Standing.height(&config), 2.0));
        assert!(approx_eq(Stance::Crouching.height(&config), 1.0));
    }

    #[test]
    fn test_default_controller() {
        let controller = StanceController::new();
        assert_eq!(controller.stance(), Stance::Standing);
        assert!(!controller.is_crouching());
        assert!(!controller.is_blocked());
    }

    #[test]
    fn test_crouch_shrinks_capsule() {
        let world = open_world();
        let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
        let mut controller = StanceController::new();
        let config = MovementConfig::double_jump();

        controller.update(true, &mut body, world.as_ref(), &config);
        assert!(controller.is_crouching());
        assert!(approx_eq(body.height(), 1.0));

        controller.update(false, &mut body, world.as_ref(), &config);
        assert_eq!(controller.stance(), Stance::Standing);
        assert!(approx_eq(body.height(), 2.0));
    }

    #[test]
    fn test_base_variant_keeps_height() {
        let world = open_world();
        let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
        let mut controller = StanceController::new();
        let config = MovementConfig::default();

        controller.update(true, &mut body, world.as_ref(), &config);
        assert!(controller.is_crouching());
        assert!(approx_eq(body.height(), 2.0));
    }

    #[test]
    fn test_cannot_stand_with_obstacle() {
        let world = low_ceiling_world(1.5);
        let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
        let mut controller = StanceController::new();
        let config = MovementConfig::double_jump();

        controller.update(true, &mut body, world.as_ref(), &config);
        controller.update(false, &mut body, world.as_ref(), &config);

        assert!(controller.is_crouching());
        assert!(controller.is_blocked());
        assert!(approx_eq(body.height(), 1.0));
    }

    #[test]
    fn test_stands_once_clear() {
        let world = low_ceiling_world(1.5);
        let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
        let mut controller = StanceController::new();
        let config = MovementConfig::double_jump();

        controller.update(true, &mut body, world.as_ref(), &config);
        controller.update(false, &mut body, world.as_ref(), &config);
        assert!(controller.is_blocked());

        // Step out from under the slab
        body.set_position(Vec3::new(8.0, body.position().y, 0.0));
        controller.update(false, &mut body, world.as_ref(), &config);
        assert_eq!(controller.stance(), Stance::Standing);
        assert!(!controller.is_blocked());
        assert!(approx_eq(body.height(), 2.0));
    }

    #[test]
    fn test_clearance_above() {
        let world = low_ceiling_world(1.5);
        let body = KinematicCapsule::standing_at(Arc::new(StaticWorld::flat(0.0)), Vec3::ZERO);
        // Standing capsule center at 1.0, slab underside at 1.5
        let clearance = StanceController::clearance_above(&body, world.as_ref(), 2.0);
        assert!(approx_eq(clearance, 1.5));

        let open = StanceController::clearance_above(&body, open_world().as_ref(), 2.0);
        assert!(approx_eq(open, 2.0));
    }

    #[test]
    fn test_can_stand_check() {
        let controller = StanceController::new();
        let config = MovementConfig::default();

        assert!(controller.can_stand(2.5, &config));
        assert!(controller.can_stand(2.0, &config));
        assert!(!controller.can_stand(1.9, &config));
    }

    #[test]
    fn test_reset() {
        let world = open_world();
        let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
        let mut controller = StanceController::new();
        controller.update(true, &mut body, world.as_ref(), &MovementConfig::default());

        controller.reset();
        assert_eq!(controller.stance(), Stance::Standing);
    }
}
