//! The gameplay screen.

use std::rc::Rc;

use arcade_core::{
    CollisionDetector, CollisionPair, Entity, EntitySet, Screen, Services, Surface, Transition,
};
use arcade_types::{Action, InputSnapshot, Rgb, Vec2};
use tracing::{debug, info};

use crate::actors::{Actor, Bolt, Raider, Role, Ship, Sprites, SHIP_SIZE};
use crate::edges::Edges;
use crate::session::Session;
use crate::waves::WAVES;
use crate::{BACKGROUND, GAME_OVER, PAUSE, VICTORY};

pub const STARTING_LIVES: u32 = 3;
pub const POINTS_PER_RAIDER: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Round {
    /// Never started, or finished: the next `enter` starts a new one.
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Continue,
    Lost,
    Won,
}

/// Runs a round: the ship, the current wave and every bolt in flight.
///
/// Leaving for the pause screen keeps the round; coming back resumes it.
/// A round that ended, or one abandoned from the pause screen, is replaced
/// by a fresh one on the next `enter`.
pub struct PlayScreen {
    world: Vec2,
    session: Rc<Session>,
    actors: EntitySet<Actor>,
    detector: CollisionDetector,
    hits: Vec<CollisionPair>,
    spawned: Vec<Bolt>,
    sprites: Sprites,
    edges: Edges,
    round: Round,
    wave: usize,
    lives: u32,
}

impl PlayScreen {
    pub fn new(world: Vec2, session: Rc<Session>) -> Self {
        Self {
            world,
            session,
            actors: EntitySet::with_capacity(64),
            detector: CollisionDetector::default(),
            hits: Vec::new(),
            spawned: Vec::new(),
            sprites: Sprites::default(),
            edges: Edges::default(),
            round: Round::Idle,
            wave: 0,
            lives: STARTING_LIVES,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave(&self) -> usize {
        self.wave
    }

    pub fn actors(&self) -> &EntitySet<Actor> {
        &self.actors
    }

    pub fn is_running(&self) -> bool {
        self.round == Round::Running
    }

    pub fn raiders_left(&self) -> usize {
        self.actors
            .iter_active()
            .filter(|a| a.role() == Role::Raider)
            .count()
    }

    /// Spawn an extra actor; used by scripted scenarios.
    pub fn spawn(&mut self, actor: Actor) -> usize {
        self.actors.spawn(actor)
    }

    fn start_round(&mut self) {
        self.actors.clear();
        self.actors.spawn(Actor::Ship(Ship::new(self.world, self.sprites.ship)));
        self.session.start_round();
        self.lives = STARTING_LIVES;
        self.wave = 0;
        self.spawn_wave();
        self.round = Round::Running;
        info!("round started");
    }

    fn spawn_wave(&mut self) {
        let Some(wave) = WAVES.get(self.wave) else {
            return;
        };
        for (anchor, pattern) in wave.formation(self.world) {
            self.actors
                .spawn(Actor::Raider(Raider::new(anchor, pattern, self.sprites.raider)));
        }
        self.session.set_wave(self.wave);
        debug!(wave = self.wave, raiders = wave.len(), "wave spawned");
    }

    fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.actors.iter_active_mut().find_map(|a| match a {
            Actor::Ship(ship) => Some(ship),
            _ => None,
        })
    }

    fn role_if_active(&self, slot: usize) -> Option<Role> {
        self.actors
            .get(slot)
            .filter(|a| a.is_active())
            .map(Actor::role)
    }

    fn damage_ship(&mut self, services: &mut Services) -> Outcome {
        let Some(ship) = self.ship_mut() else {
            return Outcome::Lost;
        };
        if !ship.hit() {
            return Outcome::Continue;
        }
        self.lives = self.lives.saturating_sub(1);
        services.play("hit");
        debug!(lives = self.lives, "ship hit");
        if self.lives == 0 {
            if let Some(ship) = self.ship_mut() {
                ship.deactivate();
            }
            return Outcome::Lost;
        }
        Outcome::Continue
    }

    /// Apply one collision. Pairs are handled in scan order; an entity
    /// destroyed by an earlier pair this frame takes no further part.
    fn resolve(&mut self, pair: CollisionPair, services: &mut Services) -> Outcome {
        let (Some(ra), Some(rb)) = (self.role_if_active(pair.a), self.role_if_active(pair.b))
        else {
            return Outcome::Continue;
        };
        let (first, second, role_first, role_second) = if ra <= rb {
            (pair.a, pair.b, ra, rb)
        } else {
            (pair.b, pair.a, rb, ra)
        };

        match (role_first, role_second) {
            (Role::Raider, Role::PlayerBolt) => {
                self.destroy(first);
                self.destroy(second);
                let points = POINTS_PER_RAIDER * (self.wave as u32 + 1);
                self.session.add_points(points);
                services.play("explosion");
                Outcome::Continue
            }
            (Role::Ship, Role::Raider) => {
                self.destroy(second);
                services.play("explosion");
                self.damage_ship(services)
            }
            (Role::Ship, Role::EnemyBolt) => {
                self.destroy(second);
                self.damage_ship(services)
            }
            _ => Outcome::Continue,
        }
    }

    fn destroy(&mut self, slot: usize) {
        if let Some(actor) = self.actors.get_mut(slot) {
            actor.deactivate();
        }
    }

    fn invaded(&self) -> bool {
        let line = self.world.y - SHIP_SIZE.y - 4.0;
        self.actors
            .iter_active()
            .any(|a| a.role() == Role::Raider && a.bounds().bottom() >= line)
    }

    /// Drop bolts that have left the world.
    fn cull_offscreen(&mut self) {
        let h = self.world.y;
        for actor in self.actors.iter_active_mut() {
            if let Actor::Bolt(bolt) = actor {
                let b = bolt.bounds();
                if b.bottom() < 0.0 || b.top() > h {
                    bolt.deactivate();
                }
            }
        }
    }

    fn simulate(&mut self, delta: f32, input: &InputSnapshot, services: &mut Services) -> Outcome {
        let sprites = self.sprites;

        let mut fired = None;
        if let Some(ship) = self.ship_mut() {
            ship.steer(input.axis);
            // Holding fire autofires at the cooldown rate.
            if input.held(Action::Fire) {
                fired = ship.try_fire(sprites.bolt);
            }
        }
        if let Some(bolt) = fired {
            self.spawned.push(bolt);
            services.play("laser");
        }

        self.actors.update_all(delta);

        for actor in self.actors.iter_active_mut() {
            if let Actor::Raider(raider) = actor {
                if let Some(bolt) = raider.take_shot(sprites.enemy_bolt) {
                    self.spawned.push(bolt);
                }
            }
        }
        for bolt in self.spawned.drain(..) {
            self.actors.spawn(Actor::Bolt(bolt));
        }
        self.cull_offscreen();

        self.hits.clear();
        self.hits
            .extend_from_slice(self.detector.scan(self.actors.as_slice()));
        let mut outcome = Outcome::Continue;
        for i in 0..self.hits.len() {
            let pair = self.hits[i];
            if self.resolve(pair, services) == Outcome::Lost {
                outcome = Outcome::Lost;
            }
        }

        if outcome == Outcome::Continue && self.invaded() {
            info!(wave = self.wave, "raiders reached the ship line");
            outcome = Outcome::Lost;
        }

        self.actors.sweep();

        if outcome == Outcome::Continue && self.raiders_left() == 0 {
            self.wave += 1;
            if self.wave >= WAVES.len() {
                return Outcome::Won;
            }
            services.play("wave");
            self.spawn_wave();
        }
        outcome
    }
}

impl Screen for PlayScreen {
    fn enter(&mut self, services: &mut Services) {
        self.sprites = Sprites {
            ship: services.sprite("ship"),
            raider: services.sprite("raider"),
            bolt: services.sprite("bolt"),
            enemy_bolt: services.sprite("enemy_bolt"),
        };
        self.edges.reset();
        if self.session.take_abandoned() || self.round == Round::Idle {
            self.start_round();
        } else {
            debug!(wave = self.wave, "round resumed");
        }
    }

    fn update(&mut self, delta: f32, input: &InputSnapshot, services: &mut Services) -> Transition {
        if self.edges.pressed(input).contains(Action::Pause) {
            return Transition::to(PAUSE);
        }
        match self.simulate(delta, input, services) {
            Outcome::Continue => Transition::Stay,
            Outcome::Lost => {
                self.round = Round::Idle;
                info!(score = self.session.score(), "round lost");
                Transition::to(GAME_OVER)
            }
            Outcome::Won => {
                self.round = Round::Idle;
                info!(score = self.session.score(), "round won");
                Transition::to(VICTORY)
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        self.actors.render_all(surface);

        let hud = format!(
            "SCORE {:>6}   WAVE {}/{}   LIVES {}",
            self.session.score(),
            (self.wave + 1).min(WAVES.len()),
            WAVES.len(),
            self.lives
        );
        surface.draw_text(Vec2::new(2.0, 2.0), &hud, Rgb::WHITE);
    }
}
