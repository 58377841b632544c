//! The entity contract.
//!
//! An entity is anything that moves, draws and can be hit: a player ship, a
//! scripted enemy, a projectile. Variants differ only in how they implement
//! [`Entity::update`] and [`Entity::render`]; collision and lifecycle are
//! shared through [`Body`].

use thiserror::Error;

use crate::surface::Surface;
use crate::types::{Rect, Vec2};

/// Why an entity could not finish its update.
///
/// Faults are local: the owning [`crate::EntitySet`] deactivates the entity
/// and the frame carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityFault {
    #[error("non-finite position or velocity ({x}, {y})")]
    NonFinite { x: f32, y: f32 },

    #[error("malformed entity state: {0}")]
    Malformed(String),
}

/// Spatial state shared by every entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second.
    pub vel: Vec2,
    active: bool,
}

impl Body {
    /// A new, active, stationary body.
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
        }
    }

    #[must_use]
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// `pos += vel * delta`.
    pub fn integrate(&mut self, delta: f32) {
        self.pos += self.vel * delta;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Fails when position or velocity went non-finite.
    pub fn validate(&self) -> Result<(), EntityFault> {
        if self.pos.is_finite() && self.vel.is_finite() {
            Ok(())
        } else {
            Err(EntityFault::NonFinite {
                x: self.pos.x,
                y: self.pos.y,
            })
        }
    }
}

/// Polymorphic unit of simulation.
///
/// Implementors provide access to their [`Body`] and a `render`; everything
/// else has a default built on the body. Inactive entities are never drawn
/// and never collide, which is how an entity leaves play mid-frame without
/// being removed from the collection being iterated.
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Advance one frame. Not re-entrant: called at most once per frame.
    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        self.body_mut().integrate(delta);
        Ok(())
    }

    /// Draw the entity. Must not change simulation state.
    fn render(&self, surface: &mut dyn Surface);

    /// Draw order: lower layers are drawn first (further back).
    fn layer(&self) -> i32 {
        0
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    fn is_active(&self) -> bool {
        self.body().is_active()
    }

    fn deactivate(&mut self) {
        self.body_mut().deactivate();
    }

    /// True iff both entities are active and their bounds overlap.
    fn check_collision(&self, other: &dyn Entity) -> bool {
        if !self.is_active() || !other.is_active() {
            return false;
        }
        self.bounds().intersects(&other.bounds())
    }
}

impl<E: Entity + ?Sized> Entity for Box<E> {
    fn body(&self) -> &Body {
        (**self).body()
    }

    fn body_mut(&mut self) -> &mut Body {
        (**self).body_mut()
    }

    fn update(&mut self, delta: f32) -> Result<(), EntityFault> {
        (**self).update(delta)
    }

    fn render(&self, surface: &mut dyn Surface) {
        (**self).render(surface)
    }

    fn layer(&self) -> i32 {
        (**self).layer()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn deactivate(&mut self) {
        (**self).deactivate()
    }

    fn check_collision(&self, other: &dyn Entity) -> bool {
        (**self).check_collision(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::types::Rgb;

    struct Block(Body);

    impl Entity for Block {
        fn body(&self) -> &Body {
            &self.0
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.fill_rect(self.bounds(), Rgb::WHITE);
        }
    }

    fn block(x: f32, y: f32, w: f32, h: f32) -> Block {
        Block(Body::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    #[test]
    fn default_update_integrates_velocity() {
        let mut b = Block(
            Body::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0))
                .with_velocity(Vec2::new(100.0, -50.0)),
        );
        b.update(0.5).unwrap();
        assert_eq!(b.body().pos, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn overlapping_active_entities_collide() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        let b = block(5.0, 5.0, 10.0, 10.0);
        assert!(a.check_collision(&b));
        assert!(b.check_collision(&a));
    }

    #[test]
    fn inactive_entity_never_collides() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        let mut b = block(5.0, 5.0, 10.0, 10.0);
        b.deactivate();
        assert!(!a.check_collision(&b));
        assert!(!b.check_collision(&a));
    }

    #[test]
    fn boxed_entities_forward_the_contract() {
        let a: Box<dyn Entity> = Box::new(block(0.0, 0.0, 4.0, 4.0));
        let b: Box<dyn Entity> = Box::new(block(2.0, 2.0, 4.0, 4.0));
        assert!(a.check_collision(&b));

        let mut s = RecordingSurface::new(Vec2::new(10.0, 10.0));
        a.render(&mut s);
        assert_eq!(s.commands().len(), 1);
    }

    #[test]
    fn validate_rejects_non_finite_state() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(body.validate().is_ok());
        body.vel = Vec2::new(f32::NAN, 0.0);
        assert!(matches!(body.validate(), Err(EntityFault::NonFinite { .. })));
    }
}
