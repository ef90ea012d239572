use ep_ui::canvas::{TEXT_SIZE, TITLE_SIZE, WHITE};
use ep_ui::Canvas;

use super::{ScreenId, Transition, BLUE, BLUE_HOVER, GREEN, GREEN_HOVER, RED};
use crate::button::Button;
use crate::game_state::GameState;

/// End-of-run screen shared by game over and victory.
pub struct Results {
    title: &'static str,
    title_color: [u8; 3],
    score_label: &'static str,
    score: u32,
    retry: Button,
    menu: Button,
}

impl Results {
    pub fn game_over(score: u32, width: f32, height: f32) -> Self {
        Self::new("Game Over", RED, "Your score", score, width, height)
    }

    pub fn victory(score: u32, width: f32, height: f32) -> Self {
        Self::new("Victory!", GREEN, "Final score", score, width, height)
    }

    fn new(
        title: &'static str,
        title_color: [u8; 3],
        score_label: &'static str,
        score: u32,
        width: f32,
        height: f32,
    ) -> Self {
        let x = width / 2.0 - 100.0;
        Self {
            title,
            title_color,
            score_label,
            score,
            retry: Button::menu(x, height / 2.0 + 50.0, "Retry", BLUE, BLUE_HOVER),
            menu: Button::menu(x, height / 2.0 + 120.0, "Main Menu", GREEN, GREEN_HOVER),
        }
    }

    /// Retry restarts the run from level 1.
    pub fn update(
        &mut self,
        (x, y): (f32, f32),
        clicked: bool,
        state: &mut GameState,
    ) -> Transition {
        self.retry.check_hover(x, y);
        self.menu.check_hover(x, y);
        if self.retry.is_clicked(x, y, clicked) {
            state.reset_level();
            return Transition::Goto(ScreenId::Gameplay);
        }
        if self.menu.is_clicked(x, y, clicked) {
            return Transition::Goto(ScreenId::MainMenu);
        }
        Transition::Stay
    }

    pub fn draw(&self, canvas: &Canvas, width: f32) {
        let cx = width / 2.0;
        let title_y = 100.0 + TITLE_SIZE / 2.0;
        canvas.text_centered(cx, title_y, TITLE_SIZE, self.title_color, self.title);
        canvas.text_centered(
            cx,
            200.0 + TEXT_SIZE / 2.0,
            TEXT_SIZE,
            WHITE,
            &format!("{}: {}", self.score_label, self.score),
        );
        self.retry.draw(canvas);
        self.menu.draw(canvas);
    }
}
