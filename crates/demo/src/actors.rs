//! Star Sweep entities: the player's ship, raiders and bolts.

use arcade_core::{Body, Entity, EntityFault, SpriteHandle, Surface};
use arcade_types::{Rect, Rgb, Vec2};

pub const SHIP_SIZE: Vec2 = Vec2::new(12.0, 8.0);
pub const SHIP_SPEED: f32 = 160.0;
pub const SHIP_FIRE_COOLDOWN: f32 = 0.25;
pub const SHIP_INVULNERABLE_SECS: f32 = 1.5;

pub const RAIDER_SIZE: Vec2 = Vec2::new(14.0, 8.0);

pub const BOLT_SIZE: Vec2 = Vec2::new(2.0, 6.0);
pub const BOLT_SPEED: f32 = 240.0;
pub const ENEMY_BOLT_SPEED: f32 = 110.0;
pub const BOLT_LIFETIME: f32 = 1.2;
pub const ENEMY_BOLT_LIFETIME: f32 = 2.5;

/// Sprite handles resolved from the asset loader; `None` falls back to a
/// filled rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sprites {
    pub ship: Option<SpriteHandle>,
    pub raider: Option<SpriteHandle>,
    pub bolt: Option<SpriteHandle>,
    pub enemy_bolt: Option<SpriteHandle>,
}

fn draw(surface: &mut dyn Surface, sprite: Option<SpriteHandle>, rect: Rect, color: Rgb) {
    match sprite {
        Some(handle) => surface.draw_sprite(handle, rect),
        None => surface.fill_rect(rect, color),
    }
}

/// Player-controlled ship. Moves horizontally along the bottom of the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    body: Body,
    min_x: f32,
    max_x: f32,
    cooldown: f32,
    invulnerable: f32,
    sprite: Option<SpriteHandle>,
}

impl Ship {
    pub fn new(world: Vec2, sprite: Option<SpriteHandle>) -> Self {
        let pos = Vec2::new((world.x - SHIP_SIZE.x) * 0.5, world.y - SHIP_SIZE.y - 4.0);
        Self {
            body: Body::new(pos, SHIP_SIZE),
            min_x: 0.0,
            max_x: world.x - SHIP_SIZE.x,
            cooldown: 0.0,
            invulnerable: 0.0,
            sprite,
        }
    }

    /// Set velocity from the horizontal input axis.
    pub fn steer(&mut self, axis: Vec2) {
        self.body.vel = Vec2::new(axis.x * SHIP_SPEED, 0.0);
    }

    /// Spawn a bolt from the nose if the gun has cooled down.
    pub fn try_fire(&mut self, sprite: Option<SpriteHandle>) -> Option<Bolt> {
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = SHIP_FIRE_COOLDOWN;
        let nose = Vec2::new(
            self.body.pos.x + (SHIP_SIZE.x - BOLT_SIZE.x) * 0.5,
            self.body.pos.y - BOLT_SIZE.y,
        );
        Some(Bolt::player(nose, sprite))
    }

    /// Take a hit. Returns false while still invulnerable from the last one.
    pub fn hit(&mut self) -> bool {
        if self.invulnerable > 0.0 {
            return false;
        }
        self.invulnerable = SHIP_INVULNERABLE_SECS;
        true
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        self.body.integrate(delta);
        self.body.pos.x = self.body.pos.x.clamp(self.min_x, self.max_x);
        self.cooldown = (self.cooldown - delta).max(0.0);
        self.invulnerable = (self.invulnerable - delta).max(0.0);
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface) {
        // Blink at 10 Hz while invulnerable.
        if self.invulnerable > 0.0 && (self.invulnerable * 10.0) as u32 % 2 == 1 {
            return;
        }
        draw(surface, self.sprite, self.bounds(), Rgb::new(80, 220, 255));
    }

    fn layer(&self) -> i32 {
        2
    }
}

/// Enemy flying a scripted sweep: a sine wave around its anchor column
/// while slowly descending.
#[derive(Debug, Clone, PartialEq)]
pub struct Raider {
    body: Body,
    anchor_x: f32,
    amplitude: f32,
    frequency: f32,
    phase: f32,
    clock: f32,
    fire_interval: f32,
    fire_timer: f32,
    shot_ready: bool,
    sprite: Option<SpriteHandle>,
}

/// How a raider moves and shoots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaiderPattern {
    pub amplitude: f32,
    /// Radians per second.
    pub frequency: f32,
    pub phase: f32,
    pub descent: f32,
    /// Seconds between shots; `0` never fires.
    pub fire_interval: f32,
}

impl Raider {
    pub fn new(anchor: Vec2, pattern: RaiderPattern, sprite: Option<SpriteHandle>) -> Self {
        let mut raider = Self {
            body: Body::new(anchor, RAIDER_SIZE).with_velocity(Vec2::new(0.0, pattern.descent)),
            anchor_x: anchor.x,
            amplitude: pattern.amplitude,
            frequency: pattern.frequency,
            phase: pattern.phase,
            clock: 0.0,
            fire_interval: pattern.fire_interval,
            // Stagger the first volley by phase so a wave doesn't fire at once.
            fire_timer: pattern.fire_interval * (1.0 + pattern.phase.rem_euclid(1.0)),
            shot_ready: false,
            sprite,
        };
        raider.body.pos.x = raider.sweep_x();
        raider
    }

    fn sweep_x(&self) -> f32 {
        self.anchor_x + self.amplitude * (self.clock * self.frequency + self.phase).sin()
    }

    /// Consume a pending shot, returning the bolt to spawn.
    pub fn take_shot(&mut self, sprite: Option<SpriteHandle>) -> Option<Bolt> {
        if !std::mem::take(&mut self.shot_ready) {
            return None;
        }
        let muzzle = Vec2::new(
            self.body.pos.x + (RAIDER_SIZE.x - BOLT_SIZE.x) * 0.5,
            self.body.pos.y + RAIDER_SIZE.y,
        );
        Some(Bolt::enemy(muzzle, sprite))
    }
}

impl Entity for Raider {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        self.clock += delta;
        // Vertical motion comes from velocity, horizontal from the script.
        self.body.integrate(delta);
        self.body.pos.x = self.sweep_x();

        if self.fire_interval > 0.0 {
            self.fire_timer -= delta;
            if self.fire_timer <= 0.0 {
                self.fire_timer += self.fire_interval;
                self.shot_ready = true;
            }
        }
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface) {
        draw(surface, self.sprite, self.bounds(), Rgb::new(240, 70, 90));
    }

    fn layer(&self) -> i32 {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Raider,
}

/// Projectile with a lifetime countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Bolt {
    body: Body,
    owner: Owner,
    ttl: f32,
    sprite: Option<SpriteHandle>,
}

impl Bolt {
    pub fn player(pos: Vec2, sprite: Option<SpriteHandle>) -> Self {
        Self {
            body: Body::new(pos, BOLT_SIZE).with_velocity(Vec2::new(0.0, -BOLT_SPEED)),
            owner: Owner::Player,
            ttl: BOLT_LIFETIME,
            sprite,
        }
    }

    pub fn enemy(pos: Vec2, sprite: Option<SpriteHandle>) -> Self {
        Self {
            body: Body::new(pos, BOLT_SIZE).with_velocity(Vec2::new(0.0, ENEMY_BOLT_SPEED)),
            owner: Owner::Raider,
            ttl: ENEMY_BOLT_LIFETIME,
            sprite,
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn ttl(&self) -> f32 {
        self.ttl
    }
}

impl Entity for Bolt {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        self.body.integrate(delta);
        self.ttl -= delta;
        if self.ttl <= 0.0 {
            self.body.deactivate();
        }
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface) {
        let color = match self.owner {
            Owner::Player => Rgb::new(255, 240, 120),
            Owner::Raider => Rgb::new(255, 150, 60),
        };
        draw(surface, self.sprite, self.bounds(), color);
    }
}

/// Every entity a Star Sweep round can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    Ship(Ship),
    Raider(Raider),
    Bolt(Bolt),
}

/// Collision-relevant role of an actor. Ordered so a colliding pair can be
/// normalized before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Ship,
    Raider,
    PlayerBolt,
    EnemyBolt,
}

impl Actor {
    pub fn role(&self) -> Role {
        match self {
            Actor::Ship(_) => Role::Ship,
            Actor::Raider(_) => Role::Raider,
            Actor::Bolt(b) if b.owner == Owner::Player => Role::PlayerBolt,
            Actor::Bolt(_) => Role::EnemyBolt,
        }
    }

    fn inner(&self) -> &dyn Entity {
        match self {
            Actor::Ship(s) => s,
            Actor::Raider(r) => r,
            Actor::Bolt(b) => b,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Entity {
        match self {
            Actor::Ship(s) => s,
            Actor::Raider(r) => r,
            Actor::Bolt(b) => b,
        }
    }
}

impl Entity for Actor {
    fn body(&self) -> &Body {
        self.inner().body()
    }

    fn body_mut(&mut self) -> &mut Body {
        self.inner_mut().body_mut()
    }

    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        self.inner_mut().update(delta)
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.inner().render(surface)
    }

    fn layer(&self) -> i32 {
        self.inner().layer()
    }
}
