//! Text-only screens: title menu, pause overlay and the end-of-round cards.

use std::rc::Rc;

use arcade_core::{Screen, Services, Surface, Transition};
use arcade_types::{Action, InputSnapshot, Rgb, Vec2};

use crate::edges::Edges;
use crate::session::Session;
use crate::{BACKGROUND, MENU, PLAY};

fn centered(surface: &mut dyn Surface, y: f32, text: &str, color: Rgb) {
    // Assumes roughly 80 text columns across the surface.
    let char_w = surface.size().x / 80.0;
    let x = (surface.size().x - text.chars().count() as f32 * char_w) * 0.5;
    surface.draw_text(Vec2::new(x.max(0.0), y), text, color);
}

pub struct MenuScreen {
    session: Rc<Session>,
    edges: Edges,
}

impl MenuScreen {
    pub fn new(session: Rc<Session>) -> Self {
        Self {
            session,
            edges: Edges::default(),
        }
    }
}

impl Screen for MenuScreen {
    fn enter(&mut self, _services: &mut Services) {
        self.edges.reset();
    }

    fn update(&mut self, _delta: f32, input: &InputSnapshot, _services: &mut Services) -> Transition {
        let pressed = self.edges.pressed(input);
        if pressed.contains(Action::Confirm) || pressed.contains(Action::Fire) {
            Transition::to(PLAY)
        } else if pressed.contains(Action::Back) {
            Transition::Quit
        } else {
            Transition::Stay
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        let h = surface.size().y;
        centered(surface, h * 0.3, "S T A R   S W E E P", Rgb::new(120, 220, 255));
        centered(surface, h * 0.5, "ENTER  start", Rgb::WHITE);
        centered(surface, h * 0.58, "Q  quit", Rgb::WHITE);
        if self.session.best() > 0 {
            let best = format!("BEST {}", self.session.best());
            centered(surface, h * 0.75, &best, Rgb::new(255, 220, 120));
        }
    }
}

pub struct PauseScreen {
    session: Rc<Session>,
    edges: Edges,
}

impl PauseScreen {
    pub fn new(session: Rc<Session>) -> Self {
        Self {
            session,
            edges: Edges::default(),
        }
    }
}

impl Screen for PauseScreen {
    fn enter(&mut self, _services: &mut Services) {
        self.edges.reset();
    }

    fn update(&mut self, _delta: f32, input: &InputSnapshot, _services: &mut Services) -> Transition {
        let pressed = self.edges.pressed(input);
        if pressed.contains(Action::Pause) || pressed.contains(Action::Confirm) {
            Transition::to(PLAY)
        } else if pressed.contains(Action::Back) {
            self.session.abandon();
            Transition::to(MENU)
        } else {
            Transition::Stay
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        let h = surface.size().y;
        centered(surface, h * 0.4, "PAUSED", Rgb::WHITE);
        let score = format!("SCORE {}", self.session.score());
        centered(surface, h * 0.5, &score, Rgb::new(255, 220, 120));
        centered(surface, h * 0.62, "P resume   BACKSPACE menu", Rgb::new(150, 150, 150));
    }
}

/// Input is ignored for this long after an end card appears so a held
/// fire button does not skip it.
const END_CARD_GRACE_SECS: f32 = 0.6;

/// Shown after a round ends; either game over or victory.
pub struct EndScreen {
    title: &'static str,
    color: Rgb,
    sound: &'static str,
    session: Rc<Session>,
    edges: Edges,
    shown_for: f32,
    new_best: bool,
}

impl EndScreen {
    pub fn game_over(session: Rc<Session>) -> Self {
        Self::new("GAME OVER", Rgb::new(240, 70, 90), "game_over", session)
    }

    pub fn victory(session: Rc<Session>) -> Self {
        Self::new("SECTOR CLEAR", Rgb::new(120, 255, 140), "victory", session)
    }

    fn new(title: &'static str, color: Rgb, sound: &'static str, session: Rc<Session>) -> Self {
        Self {
            title,
            color,
            sound,
            session,
            edges: Edges::default(),
            shown_for: 0.0,
            new_best: false,
        }
    }
}

impl Screen for EndScreen {
    fn enter(&mut self, services: &mut Services) {
        self.edges.reset();
        self.shown_for = 0.0;
        self.new_best = self.session.finish_round();
        services.play(self.sound);
    }

    fn update(&mut self, delta: f32, input: &InputSnapshot, _services: &mut Services) -> Transition {
        self.shown_for += delta;
        let pressed = self.edges.pressed(input);
        if self.shown_for < END_CARD_GRACE_SECS {
            return Transition::Stay;
        }
        if pressed.contains(Action::Confirm) || pressed.contains(Action::Back) {
            Transition::to(MENU)
        } else {
            Transition::Stay
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        let h = surface.size().y;
        centered(surface, h * 0.35, self.title, self.color);
        let score = format!("SCORE {}", self.session.score());
        centered(surface, h * 0.5, &score, Rgb::WHITE);
        if self.new_best {
            centered(surface, h * 0.58, "NEW BEST", Rgb::new(255, 220, 120));
        }
        centered(surface, h * 0.72, "ENTER  menu", Rgb::new(150, 150, 150));
    }
}
