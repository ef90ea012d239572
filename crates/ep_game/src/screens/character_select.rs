use ep_ui::canvas::{SMALL_SIZE, TITLE_SIZE, WHITE};
use ep_ui::Canvas;

use super::{ScreenId, Transition, RED, RED_HOVER};
use crate::button::Button;
use crate::game_state::GameState;
use crate::geometry::Rect;
use crate::player::CharacterClass;

const CLASS_COLOR: [u8; 3] = [50, 50, 150];
const CLASS_HOVER: [u8; 3] = [100, 100, 255];

pub struct CharacterSelect {
    classes: Vec<(CharacterClass, Button)>,
    back: Button,
}

impl CharacterSelect {
    pub fn new(width: f32, height: f32) -> Self {
        let classes = CharacterClass::ALL
            .iter()
            .enumerate()
            .map(|(i, &class)| {
                let rect = Rect::new(width / 2.0 - 150.0, 200.0 + i as f32 * 120.0, 300.0, 100.0);
                (class, Button::new(rect, class.label(), CLASS_COLOR, CLASS_HOVER))
            })
            .collect();
        Self {
            classes,
            back: back_button(height),
        }
    }

    pub fn update(
        &mut self,
        (x, y): (f32, f32),
        clicked: bool,
        state: &mut GameState,
    ) -> Transition {
        let mut transition = Transition::Stay;
        for (class, button) in &mut self.classes {
            button.check_hover(x, y);
            if button.is_clicked(x, y, clicked) {
                state.player_class = *class;
                log::info!("Class chosen: {}", class.id());
                transition = Transition::Goto(ScreenId::NameInput);
            }
        }
        self.back.check_hover(x, y);
        if self.back.is_clicked(x, y, clicked) {
            transition = Transition::Back;
        }
        transition
    }

    pub fn draw(&self, canvas: &Canvas, width: f32) {
        let title_y = 50.0 + TITLE_SIZE / 2.0;
        canvas.text_centered(width / 2.0, title_y, TITLE_SIZE, WHITE, "Choose your hero");
        for (class, button) in &self.classes {
            button.draw(canvas);
            canvas.text_centered(
                width / 2.0,
                button.rect.bottom() + 5.0 + SMALL_SIZE / 2.0,
                SMALL_SIZE,
                WHITE,
                class.description(),
            );
        }
        self.back.draw(canvas);
    }
}

/// Bottom-left "Back" button shared with the high-score table.
pub(super) fn back_button(height: f32) -> Button {
    Button::new(
        Rect::new(50.0, height - 70.0, 150.0, 50.0),
        "Back",
        RED,
        RED_HOVER,
    )
}
