use ep_ui::canvas::{TEXT_SIZE, TITLE_SIZE, WHITE};
use ep_ui::Canvas;

use super::character_select::back_button;
use super::Transition;
use crate::button::Button;
use crate::game_state::{GameState, HighScore};

pub struct HighScores {
    back: Button,
}

impl HighScores {
    pub fn new(height: f32) -> Self {
        Self {
            back: back_button(height),
        }
    }

    pub fn update(&mut self, (x, y): (f32, f32), clicked: bool) -> Transition {
        self.back.check_hover(x, y);
        if self.back.is_clicked(x, y, clicked) {
            Transition::Back
        } else {
            Transition::Stay
        }
    }

    pub fn draw(&self, canvas: &Canvas, width: f32, state: &GameState) {
        let cx = width / 2.0;
        canvas.text_centered(cx, 50.0 + TITLE_SIZE / 2.0, TITLE_SIZE, WHITE, "High Scores");
        if state.highscores.is_empty() {
            let y = 200.0 + TEXT_SIZE / 2.0;
            canvas.text_centered(cx, y, TEXT_SIZE, WHITE, "No high scores yet!");
        } else {
            for (i, entry) in state.highscores.iter().take(10).enumerate() {
                let y = 150.0 + i as f32 * 40.0;
                canvas.text(cx - 250.0, y, TEXT_SIZE, WHITE, &score_row(i, entry));
            }
        }
        self.back.draw(canvas);
    }
}

pub fn score_row(index: usize, entry: &HighScore) -> String {
    format!(
        "{}. {} ({}): {} (lvl {})",
        index + 1,
        entry.name,
        entry.class,
        entry.score,
        entry.level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_one_based() {
        let entry = HighScore {
            name: "Ann".to_string(),
            class: "archer".to_string(),
            score: 300,
            level: 3,
        };
        assert_eq!(score_row(0, &entry), "1. Ann (archer): 300 (lvl 3)");
    }
}
