use ep_ui::canvas::{TEXT_SIZE, WHITE};
use ep_ui::Canvas;

use super::{ScreenId, Transition};
use crate::game_state::GameState;
use crate::session::{GameplaySession, SessionOutcome};

const YELLOW: [u8; 3] = [255, 255, 0];

/// Map a finished tick onto the flow. `last_score` is what the results
/// screen shows and what Victory saves.
pub fn resolve(
    outcome: SessionOutcome,
    session: &GameplaySession,
    state: &mut GameState,
    last_score: &mut u32,
) -> Transition {
    match outcome {
        SessionOutcome::Continue => Transition::Stay,
        SessionOutcome::Exit => Transition::Back,
        SessionOutcome::PlayerDied => {
            *last_score = session.player.score;
            Transition::Goto(ScreenId::GameOver)
        }
        SessionOutcome::LevelComplete => {
            *last_score = session.player.score;
            if state.next_level() {
                log::info!("Advancing to level {}", state.current_level);
                Transition::Goto(ScreenId::Gameplay)
            } else {
                Transition::Goto(ScreenId::Victory)
            }
        }
    }
}

pub fn draw_hud(canvas: &Canvas, session: &GameplaySession, width: f32) {
    let player = &session.player;
    canvas.text(10.0, 10.0, TEXT_SIZE, WHITE, &format!("HP: {}", player.entity.health()));
    canvas.text(10.0, 50.0, TEXT_SIZE, YELLOW, &format!("Coins: {}", player.coins));
    canvas.text(10.0, 90.0, TEXT_SIZE, WHITE, &format!("Score: {}", player.score));
    canvas.text_right(width - 10.0, 10.0, TEXT_SIZE, WHITE, &format!("Level: {}", session.level));
}
