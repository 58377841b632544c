//! Star Sweep: a small fixed-screen shooter built on `arcade-core`.
//!
//! The ship moves along the bottom of the world and shoots upward; raiders
//! sweep side to side in formation while descending and firing back. Clear
//! every wave to win. Lose all lives, or let a raider reach the ship's line,
//! and the round is over.
//!
//! The game only talks to the engine through the core contracts, so it runs
//! the same against the terminal backend, a recording surface in tests, or
//! a replayed trace.

use std::rc::Rc;

use arcade_core::{EngineResult, Services, StateManager};
use arcade_types::{Rgb, Vec2};

pub mod actors;
pub mod edges;
pub mod screens;
pub mod session;
pub mod waves;

pub use actors::{Actor, Bolt, Owner, Raider, RaiderPattern, Role, Ship, Sprites};
pub use screens::{EndScreen, MenuScreen, PauseScreen, PlayScreen};
pub use session::Session;

pub const MENU: &str = "menu";
pub const PLAY: &str = "play";
pub const PAUSE: &str = "pause";
pub const GAME_OVER: &str = "game_over";
pub const VICTORY: &str = "victory";

/// World size in game units.
pub const WORLD: Vec2 = Vec2::new(320.0, 200.0);

pub const BACKGROUND: Rgb = Rgb::new(8, 8, 20);

/// Sprite names the game asks for, with a suggested glyph and color for
/// character-cell backends.
pub const SPRITES: [(&str, char, Rgb); 4] = [
    ("ship", 'A', Rgb::new(80, 220, 255)),
    ("raider", 'W', Rgb::new(240, 70, 90)),
    ("bolt", '|', Rgb::new(255, 240, 120)),
    ("enemy_bolt", '!', Rgb::new(255, 150, 60)),
];

/// Register every Star Sweep screen on `states`.
pub fn register_screens(states: &mut StateManager, session: Rc<Session>) -> EngineResult<()> {
    states.add_state(MENU, MenuScreen::new(session.clone()))?;
    states.add_state(PLAY, PlayScreen::new(WORLD, session.clone()))?;
    states.add_state(PAUSE, PauseScreen::new(session.clone()))?;
    states.add_state(GAME_OVER, EndScreen::game_over(session.clone()))?;
    states.add_state(VICTORY, EndScreen::victory(session))?;
    Ok(())
}

/// A state manager with every screen registered and the menu current.
pub fn new_game(services: Services) -> EngineResult<(StateManager, Rc<Session>)> {
    let session = Rc::new(Session::new());
    let mut states = StateManager::with_services(services);
    register_screens(&mut states, session.clone())?;
    states.change_state(MENU)?;
    Ok((states, session))
}
