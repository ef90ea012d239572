use ep_core::{InputState, Key};
use ep_ui::canvas::{SMALL_SIZE, TEXT_SIZE, TITLE_SIZE, WHITE};
use ep_ui::Canvas;

use super::{ScreenId, Transition};
use crate::game_state::GameState;

pub struct NameInput {
    typed: String,
    max_len: usize,
}

impl NameInput {
    pub fn new(max_len: usize) -> Self {
        Self {
            typed: String::new(),
            max_len,
        }
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Backspace is applied before this tick's characters; Enter confirms
    /// after them.
    pub fn update(&mut self, input: &InputState, state: &mut GameState) -> Transition {
        if input.is_just_pressed(Key::Backspace) {
            self.typed.pop();
        }
        for c in input.typed_text().chars() {
            if self.typed.chars().count() >= self.max_len {
                break;
            }
            self.typed.push(c);
        }
        if input.is_just_pressed(Key::Enter) {
            state.set_player_name(&self.typed);
            log::info!("Player name: {}", state.player_name);
            return Transition::Goto(ScreenId::Gameplay);
        }
        Transition::Stay
    }

    pub fn draw(&self, canvas: &Canvas, width: f32) {
        let cx = width / 2.0;
        canvas.text_centered(cx, 100.0 + TITLE_SIZE / 2.0, TITLE_SIZE, WHITE, "Enter your name");
        canvas.text_centered(cx, 200.0 + TEXT_SIZE / 2.0, TEXT_SIZE, WHITE, "Hero name:");
        canvas.outline(cx - 200.0, 245.0, 400.0, TEXT_SIZE + 12.0, WHITE);
        canvas.text_centered(cx, 250.0 + TEXT_SIZE / 2.0, TEXT_SIZE, WHITE, self.typed());
        canvas.text_centered(
            cx,
            350.0 + SMALL_SIZE / 2.0,
            SMALL_SIZE,
            WHITE,
            "Press ENTER to continue",
        );
    }
}
