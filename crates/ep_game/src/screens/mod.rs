//! Screen flow.
//!
//! One `ScreenFlow` owns the active screen and the run's `GameState`. The
//! main loop calls `step()` once per fixed tick; the active screen returns a
//! `Transition` and the flow swaps screens, running that screen's on-enter
//! hook (music, score saving, building a level). Screens never call each
//! other, so a long session does not grow any stack.
//!
//! `Back` always lands on the main menu and keeps the current `GameState`;
//! `Goto(MainMenu)` starts over with a freshly loaded one.

mod character_select;
mod gameplay;
mod highscores;
mod main_menu;
mod name_input;
mod results;

use ep_core::{GameConfig, InputState};
use ep_ui::Canvas;

use crate::assets::AssetRegistry;
use crate::audio::{MusicSink, MusicTrack, SoundCue, SoundSink};
use crate::game_state::GameState;
use crate::session::{GameplayInput, GameplaySession};

use character_select::CharacterSelect;
use highscores::HighScores;
use main_menu::MainMenu;
use name_input::NameInput;
use results::Results;

pub(crate) const BLUE: [u8; 3] = [0, 0, 255];
pub(crate) const BLUE_HOVER: [u8; 3] = [0, 100, 255];
pub(crate) const GREEN: [u8; 3] = [0, 255, 0];
pub(crate) const GREEN_HOVER: [u8; 3] = [0, 200, 100];
pub(crate) const RED: [u8; 3] = [255, 0, 0];
pub(crate) const RED_HOVER: [u8; 3] = [200, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    MainMenu,
    CharacterSelect,
    NameInput,
    Gameplay,
    GameOver,
    Victory,
    HighScores,
}

impl ScreenId {
    pub fn label(self) -> &'static str {
        match self {
            ScreenId::MainMenu => "main menu",
            ScreenId::CharacterSelect => "character select",
            ScreenId::NameInput => "name input",
            ScreenId::Gameplay => "gameplay",
            ScreenId::GameOver => "game over",
            ScreenId::Victory => "victory",
            ScreenId::HighScores => "high scores",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(ScreenId),
    Back,
    Quit,
}

enum Screen {
    MainMenu(MainMenu),
    CharacterSelect(CharacterSelect),
    NameInput(NameInput),
    Gameplay(Box<GameplaySession>),
    GameOver(Results),
    Victory(Results),
    HighScores(HighScores),
}

impl Screen {
    fn id(&self) -> ScreenId {
        match self {
            Screen::MainMenu(_) => ScreenId::MainMenu,
            Screen::CharacterSelect(_) => ScreenId::CharacterSelect,
            Screen::NameInput(_) => ScreenId::NameInput,
            Screen::Gameplay(_) => ScreenId::Gameplay,
            Screen::GameOver(_) => ScreenId::GameOver,
            Screen::Victory(_) => ScreenId::Victory,
            Screen::HighScores(_) => ScreenId::HighScores,
        }
    }
}

pub struct ScreenFlow {
    config: GameConfig,
    screen: Screen,
    state: GameState,
    last_score: u32,
}

impl ScreenFlow {
    /// Start on the main menu.
    pub fn new(config: GameConfig, audio: &mut impl MusicSink) -> Self {
        let state = GameState::load(&config);
        let menu = MainMenu::new(config.width_f(), config.height_f());
        audio.play_music(MusicTrack::Menu, true, config.music_volume);
        Self {
            config,
            screen: Screen::MainMenu(menu),
            state,
            last_score: 0,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.screen.id()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> Option<&GameplaySession> {
        match &self.screen {
            Screen::Gameplay(session) => Some(session),
            _ => None,
        }
    }

    /// Advance the active screen by one tick. Returns false once the
    /// player asked to quit.
    pub fn step<A>(&mut self, input: &InputState, assets: &mut AssetRegistry, audio: &mut A) -> bool
    where
        A: SoundSink + MusicSink,
    {
        let cursor = (input.mouse_position.0 as f32, input.mouse_position.1 as f32);
        let clicked = input.clicked();

        let transition = match &mut self.screen {
            Screen::MainMenu(menu) => menu.update(cursor, clicked),
            Screen::CharacterSelect(select) => select.update(cursor, clicked, &mut self.state),
            Screen::NameInput(entry) => entry.update(input, &mut self.state),
            Screen::Gameplay(session) => {
                let outcome = session.tick(GameplayInput::from_input(input), &mut *audio);
                gameplay::resolve(outcome, session, &mut self.state, &mut self.last_score)
            }
            Screen::GameOver(results) | Screen::Victory(results) => {
                results.update(cursor, clicked, &mut self.state)
            }
            Screen::HighScores(table) => table.update(cursor, clicked),
        };

        match transition {
            Transition::Stay => {}
            Transition::Goto(next) => self.enter(next, assets, audio),
            Transition::Back => self.back(audio),
            Transition::Quit => {
                log::info!("Quit from {}", self.current().label());
                return false;
            }
        }
        true
    }

    fn enter<A>(&mut self, next: ScreenId, assets: &mut AssetRegistry, audio: &mut A)
    where
        A: SoundSink + MusicSink,
    {
        log::info!("Screen: {} -> {}", self.current().label(), next.label());
        let (width, height) = (self.config.width_f(), self.config.height_f());
        let volume = self.config.music_volume;

        self.screen = match next {
            ScreenId::MainMenu => {
                self.state = GameState::load(&self.config);
                audio.play_music(MusicTrack::Menu, true, volume);
                Screen::MainMenu(MainMenu::new(width, height))
            }
            ScreenId::CharacterSelect => {
                Screen::CharacterSelect(CharacterSelect::new(width, height))
            }
            ScreenId::NameInput => Screen::NameInput(NameInput::new(self.state.name_max_len())),
            ScreenId::Gameplay => {
                let level = self.state.current_level;
                if let Some(track) = MusicTrack::for_level(level) {
                    audio.play_music(track, true, volume);
                }
                Screen::Gameplay(Box::new(GameplaySession::new(
                    level,
                    self.state.player_class,
                    &self.config,
                    assets,
                )))
            }
            ScreenId::GameOver => {
                audio.play_music(MusicTrack::Menu, true, volume);
                Screen::GameOver(Results::game_over(self.last_score, width, height))
            }
            ScreenId::Victory => {
                audio.play_music(MusicTrack::Menu, true, volume);
                audio.play(SoundCue::Victory);
                if let Err(err) = self.state.save_highscore(self.last_score) {
                    log::error!("{err}; high score not persisted");
                }
                Screen::Victory(Results::victory(self.last_score, width, height))
            }
            ScreenId::HighScores => Screen::HighScores(HighScores::new(height)),
        };
    }

    /// Return to the main menu. Leaving a level abandons the run.
    fn back(&mut self, audio: &mut impl MusicSink) {
        log::info!("Screen: {} -> main menu (back)", self.current().label());
        if self.current() == ScreenId::Gameplay {
            self.state.reset_level();
            audio.play_music(MusicTrack::Menu, true, self.config.music_volume);
        }
        self.screen = Screen::MainMenu(MainMenu::new(
            self.config.width_f(),
            self.config.height_f(),
        ));
    }

    /// Immediate-mode overlay for the active screen. Level geometry and
    /// sprites are drawn by the sprite pass underneath.
    pub fn draw(&self, canvas: &Canvas) {
        let width = self.config.width_f();
        match &self.screen {
            Screen::MainMenu(menu) => menu.draw(canvas, width),
            Screen::CharacterSelect(select) => select.draw(canvas, width),
            Screen::NameInput(entry) => entry.draw(canvas, width),
            Screen::Gameplay(session) => gameplay::draw_hud(canvas, session, width),
            Screen::GameOver(results) | Screen::Victory(results) => results.draw(canvas, width),
            Screen::HighScores(table) => table.draw(canvas, width, &self.state),
        }
    }
}
