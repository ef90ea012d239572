use ep_ui::canvas::{SMALL_SIZE, TEXT_SIZE, TITLE_SIZE, WHITE};
use ep_ui::Canvas;

use super::{ScreenId, Transition, BLUE, BLUE_HOVER, GREEN, GREEN_HOVER, RED, RED_HOVER};
use crate::button::Button;

const PURPLE: [u8; 3] = [128, 0, 128];

pub struct MainMenu {
    play: Button,
    highscores: Button,
    exit: Button,
}

impl MainMenu {
    pub fn new(width: f32, height: f32) -> Self {
        let x = width / 2.0 - 100.0;
        let y = height / 2.0;
        Self {
            play: Button::menu(x, y - 50.0, "Play", BLUE, BLUE_HOVER),
            highscores: Button::menu(x, y + 20.0, "High Scores", GREEN, GREEN_HOVER),
            exit: Button::menu(x, y + 90.0, "Exit", RED, RED_HOVER),
        }
    }

    pub fn update(&mut self, (x, y): (f32, f32), clicked: bool) -> Transition {
        let mut transition = Transition::Stay;
        for (button, target) in [
            (&mut self.play, Transition::Goto(ScreenId::CharacterSelect)),
            (&mut self.highscores, Transition::Goto(ScreenId::HighScores)),
            (&mut self.exit, Transition::Quit),
        ] {
            button.check_hover(x, y);
            if button.is_clicked(x, y, clicked) {
                transition = target;
            }
        }
        transition
    }

    pub fn draw(&self, canvas: &Canvas, width: f32) {
        let title_y = 100.0 + TITLE_SIZE / 2.0;
        canvas.text_centered(width / 2.0, title_y, TITLE_SIZE, PURPLE, "EPIC PLATFORMER");
        canvas.text_centered(
            width / 2.0,
            200.0 + TEXT_SIZE / 2.0,
            TEXT_SIZE,
            WHITE,
            "Choose an action:",
        );
        self.play.draw(canvas);
        self.highscores.draw(canvas);
        self.exit.draw(canvas);
        canvas.text_centered(
            width / 2.0,
            700.0,
            SMALL_SIZE,
            WHITE,
            "Arrows move, Space jumps, F attacks, Esc leaves a level",
        );
    }
}
