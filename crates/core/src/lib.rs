//! Engine core - entities, screens, collisions and frame timing
//!
//! This crate is the reusable part shared by every game. It has **no I/O**:
//! rendering, assets and audio are reached only through the collaborator
//! traits in [`surface`], so everything here runs headless and deterministic.
//!
//! # Module Structure
//!
//! - [`timer`]: monotonic clocks and the clamped per-frame delta
//! - [`entity`]: the `Entity` contract (update / render / bounds) and `Body`
//! - [`entities`]: `EntitySet`, a slot collection with two-phase removal
//! - [`collision`]: pairwise AABB scan over active entities
//! - [`screen`]: the `Screen` lifecycle and the `Transition` it returns
//! - [`state`]: `StateManager`, the registry that owns screen transitions
//! - [`surface`]: rendering / asset / audio collaborator interfaces
//! - [`error`]: engine error taxonomy
//!
//! # Frame Flow
//!
//! ```text
//! StateManager::update(delta, input)
//!   -> current Screen::update
//!        -> EntitySet::update_all(delta)
//!        -> CollisionDetector::scan(active entities)
//!        -> screen reacts (damage, destroy, score)
//!        -> EntitySet::sweep()
//!   <- Transition (Stay | Switch | Quit), applied by the manager
//! StateManager::render(surface) -> Screen::render -> EntitySet::render_all
//! ```
//!
//! # Example
//!
//! ```
//! use arcade_core::{Body, Entity, EntitySet, CollisionDetector, Surface};
//! use arcade_core::types::{Rgb, Vec2};
//!
//! struct Crate(Body);
//!
//! impl Entity for Crate {
//!     fn body(&self) -> &Body { &self.0 }
//!     fn body_mut(&mut self) -> &mut Body { &mut self.0 }
//!     fn render(&self, surface: &mut dyn Surface) {
//!         surface.fill_rect(self.bounds(), Rgb::new(160, 110, 60));
//!     }
//! }
//!
//! let mut set = EntitySet::new();
//! set.spawn(Crate(Body::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0))));
//! set.spawn(Crate(Body::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0))));
//!
//! let mut detector = CollisionDetector::new();
//! assert_eq!(detector.scan(set.as_slice()).len(), 1);
//! ```

pub mod collision;
pub mod entities;
pub mod entity;
pub mod error;
pub mod screen;
pub mod state;
pub mod surface;
pub mod timer;

pub use arcade_types as types;

pub use collision::{colliding_pairs, CollisionDetector, CollisionPair};
pub use entities::EntitySet;
pub use entity::{Body, Entity, EntityFault};
pub use error::{EngineError, EngineResult};
pub use screen::{Screen, Transition};
pub use state::StateManager;
pub use surface::{
    AssetLoader, AudioSink, DrawCommand, NullAssets, RecordingSurface, Services, SilentAudio,
    SpriteHandle, Surface,
};
pub use timer::{clamp_delta, Clock, FrameTimer, ManualClock, SystemClock};
