//! State shared by every character: body rectangle, velocity, health, the
//! animation state machine and the attack cooldown.

use std::collections::HashMap;

use ep_core::Animation;
use glam::Vec2;

use crate::geometry::Rect;
use crate::sheet::SpriteFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Run,
    Jump,
    Attack,
    Death,
}

impl AnimState {
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::Attack => "attack",
            AnimState::Death => "death",
        }
    }
}

pub type AnimationSet = HashMap<AnimState, Animation<SpriteFrame>>;

#[derive(Debug, Clone)]
pub struct EntityState {
    pub rect: Rect,
    pub velocity: Vec2,
    pub facing_right: bool,
    pub attack_cooldown_ms: f32,
    health: i32,
    max_health: i32,
    alive: bool,
    state: AnimState,
    animations: AnimationSet,
}

impl EntityState {
    pub fn new(rect: Rect, max_health: i32, animations: AnimationSet) -> Self {
        Self {
            rect,
            velocity: Vec2::ZERO,
            facing_right: true,
            attack_cooldown_ms: 0.0,
            health: max_health,
            max_health,
            alive: true,
            state: AnimState::Idle,
            animations,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    /// Switch to `target`, restarting its clip. Staying in the current state
    /// keeps the clip's progress. Unknown clips are ignored, and a dead
    /// entity cannot leave `Death`.
    pub fn set_animation(&mut self, target: AnimState) {
        if self.state == target || (!self.alive && target != AnimState::Death) {
            return;
        }
        let Some(clip) = self.animations.get_mut(&target) else {
            return;
        };
        clip.reset();
        self.state = target;
    }

    /// Apply damage. Returns true only on the hit that kills.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - amount).clamp(0, self.max_health);
        if self.health > 0 {
            return false;
        }
        self.alive = false;
        // Death is forced even without a clip so the state label stays truthful.
        if self.state != AnimState::Death {
            if let Some(clip) = self.animations.get_mut(&AnimState::Death) {
                clip.reset();
            }
            self.state = AnimState::Death;
        }
        true
    }

    pub fn cooldown_ready(&self) -> bool {
        self.attack_cooldown_ms <= 0.0
    }

    pub fn update_cooldowns(&mut self, frame_ms: f32) {
        if self.attack_cooldown_ms > 0.0 {
            self.attack_cooldown_ms = (self.attack_cooldown_ms - frame_ms).max(0.0);
        }
    }

    pub fn advance_animation(&mut self) {
        if let Some(clip) = self.animations.get_mut(&self.state) {
            clip.advance();
        }
    }

    /// A state with no clip counts as finished.
    pub fn clip_done(&self, state: AnimState) -> bool {
        self.animations.get(&state).is_none_or(|clip| clip.is_done())
    }

    pub fn current_frame(&self) -> Option<&SpriteFrame> {
        self.animations
            .get(&self.state)
            .and_then(|clip| clip.current_frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> SpriteFrame {
        SpriteFrame::solid(50.0, 50.0, [255, 0, 0])
    }

    fn entity_with(clips: &[(AnimState, usize, f32, bool)]) -> EntityState {
        let animations = clips
            .iter()
            .map(|&(state, len, speed, looping)| {
                (state, Animation::new(vec![frame(); len], speed, looping))
            })
            .collect();
        EntityState::new(Rect::new(0.0, 0.0, 50.0, 80.0), 100, animations)
    }

    fn full_set() -> EntityState {
        entity_with(&[
            (AnimState::Idle, 4, 0.25, true),
            (AnimState::Run, 6, 0.25, true),
            (AnimState::Attack, 4, 0.5, false),
            (AnimState::Death, 4, 0.25, false),
        ])
    }

    #[test]
    fn reselecting_state_keeps_progress() {
        let mut e = full_set();
        e.set_animation(AnimState::Run);
        for _ in 0..8 {
            e.advance_animation();
        }
        e.set_animation(AnimState::Run);
        assert_eq!(e.animations[&AnimState::Run].frame_index(), 2);

        e.set_animation(AnimState::Idle);
        e.set_animation(AnimState::Run);
        assert_eq!(e.animations[&AnimState::Run].frame_index(), 0);
    }

    #[test]
    fn missing_clip_leaves_state_unchanged() {
        let mut e = full_set();
        e.set_animation(AnimState::Jump);
        assert_eq!(e.state(), AnimState::Idle);
        assert!(e.clip_done(AnimState::Jump));
    }

    #[test]
    fn damage_clamps_and_death_is_permanent() {
        let mut e = full_set();
        assert!(!e.take_damage(30));
        assert_eq!(e.health(), 70);
        assert!(e.is_alive());

        assert!(e.take_damage(500));
        assert_eq!(e.health(), 0);
        assert!(!e.is_alive());
        assert_eq!(e.state(), AnimState::Death);

        // Second lethal hit reports nothing; state cannot be changed back.
        assert!(!e.take_damage(10));
        e.set_animation(AnimState::Idle);
        e.set_animation(AnimState::Run);
        assert_eq!(e.state(), AnimState::Death);
        assert_eq!(e.health(), 0);
    }

    #[test]
    fn death_without_clip_still_sets_state() {
        let mut e = entity_with(&[(AnimState::Idle, 1, 0.25, true)]);
        assert!(e.take_damage(100));
        assert_eq!(e.state(), AnimState::Death);
        assert!(e.current_frame().is_none());
    }

    #[test]
    fn cooldown_floors_at_zero() {
        let mut e = full_set();
        e.attack_cooldown_ms = 20.0;
        e.update_cooldowns(16.0);
        assert!(!e.cooldown_ready());
        e.update_cooldowns(16.0);
        assert_eq!(e.attack_cooldown_ms, 0.0);
        assert!(e.cooldown_ready());
    }
}
