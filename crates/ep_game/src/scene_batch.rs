//! Turns a gameplay session into sprite-batch quads.
//!
//! Draw order: platforms, coins, enemies, player. Entity frames are drawn
//! at the entity's top-left corner at the frame's own size, mirrored when
//! facing left.

use ep_render::{QuadSpec, SpriteBatch};

use crate::entity::EntityState;
use crate::session::GameplaySession;
use crate::sheet::rgb_to_tint;
use crate::world::COIN_YELLOW;

/// Entities with no frame for their state are drawn as a flat grey box.
const MISSING_FRAME_GREY: [u8; 3] = [128, 128, 128];

pub fn push_session(batch: &mut SpriteBatch, session: &GameplaySession) {
    for platform in &session.world.platforms {
        let r = platform.rect;
        batch.push(QuadSpec::solid(r.x, r.y, r.width, r.height, rgb_to_tint(platform.color)));
    }
    for coin in &session.world.coins {
        let r = coin.rect;
        batch.push(QuadSpec::solid(r.x, r.y, r.width, r.height, rgb_to_tint(COIN_YELLOW)));
    }
    for enemy in &session.world.enemies {
        push_entity(batch, &enemy.entity);
    }
    push_entity(batch, &session.player.entity);
}

fn push_entity(batch: &mut SpriteBatch, entity: &EntityState) {
    let r = entity.rect;
    match entity.current_frame() {
        Some(frame) => batch.push(QuadSpec {
            texture_key: frame.texture.clone(),
            x: r.x,
            y: r.y,
            width: frame.width,
            height: frame.height,
            uv: frame.uv_facing(entity.facing_right),
            color: frame.tint,
        }),
        None => batch.push(QuadSpec::solid(
            r.x,
            r.y,
            r.width,
            r.height,
            rgb_to_tint(MISSING_FRAME_GREY),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AnimationSet;
    use crate::geometry::Rect;
    use crate::player::{CharacterClass, Player, PlayerTuning};
    use ep_core::GameConfig;
    use ep_render::WHITE_TEXTURE;

    fn level_one() -> GameplaySession {
        let cfg = GameConfig::default();
        let player = Player::new(
            Rect::new(100.0, 300.0, 50.0, 80.0),
            CharacterClass::Archer,
            100,
            AnimationSet::new(),
            PlayerTuning::from_config(&cfg),
        );
        GameplaySession::with_player(1, player, &cfg)
    }

    #[test]
    fn level_one_batches_every_object_once() {
        let session = level_one();
        let mut batch = SpriteBatch::new();
        push_session(&mut batch, &session);

        // 4 platforms, 2 coins, 1 slime, the player.
        assert_eq!(batch.quad_count(), 8);
        // Everything here uses the white texture, so one draw call.
        assert_eq!(batch.draw_calls.len(), 1);
        assert_eq!(&*batch.draw_calls[0].texture_key, WHITE_TEXTURE);
    }

    #[test]
    fn left_facing_slime_is_mirrored() {
        let mut session = level_one();
        session.world.enemies[0].entity.facing_right = false;
        let mut batch = SpriteBatch::new();
        push_session(&mut batch, &session);

        // Slime quad comes after 4 platforms and 2 coins.
        let first = 6 * 4;
        assert_eq!(batch.vertices[first].tex_coords, [1.0, 0.0]);
        assert_eq!(batch.vertices[first + 1].tex_coords, [0.0, 0.0]);
    }
}
