//! Slot collection of entities with two-phase removal.
//!
//! During a frame entities are only ever *deactivated*; the slots stay put so
//! collision pairs and other indices remain valid. [`EntitySet::sweep`] drops
//! the inactive ones in a single pass at the end of the frame.

use std::cell::RefCell;

use tracing::warn;

use crate::entity::Entity;
use crate::surface::Surface;

/// Owned entities of one screen, in insertion order.
#[derive(Debug, Clone)]
pub struct EntitySet<E> {
    items: Vec<E>,
    /// Scratch for [`render_all`](Self::render_all), kept between frames.
    draw_order: RefCell<Vec<usize>>,
}

impl<E> Default for EntitySet<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draw_order: RefCell::default(),
        }
    }
}

impl<E: Entity> EntitySet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            draw_order: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Add an entity and return its slot.
    ///
    /// Slots are stable until the next [`sweep`](Self::sweep).
    pub fn spawn(&mut self, entity: E) -> usize {
        self.items.push(entity);
        self.items.len() - 1
    }

    pub fn get(&self, slot: usize) -> Option<&E> {
        self.items.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut E> {
        self.items.get_mut(slot)
    }

    /// Every slot, including inactive entities awaiting the sweep.
    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &E> {
        self.items.iter().filter(|e| e.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.items.iter_mut().filter(|e| e.is_active())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Update every active entity once.
    ///
    /// An entity whose update faults, or that ends the update with a
    /// non-finite position or velocity, is deactivated; the rest of the frame
    /// is unaffected. Returns the number of entities deactivated that way.
    pub fn update_all(&mut self, delta: f32) -> usize {
        let mut faults = 0;
        for (slot, entity) in self.items.iter_mut().enumerate() {
            if !entity.is_active() {
                continue;
            }
            let outcome = entity
                .update(delta)
                .and_then(|()| entity.body().validate());
            if let Err(fault) = outcome {
                warn!(slot, %fault, "entity update failed, deactivating");
                entity.deactivate();
                faults += 1;
            }
        }
        faults
    }

    /// Draw active entities back-to-front.
    ///
    /// Order is by [`Entity::layer`], then by insertion order within a layer.
    ///
    /// Does not allocate once the scratch buffer has grown to the set's size.
    pub fn render_all(&self, surface: &mut dyn Surface) {
        let mut order = self.draw_order.take();
        order.clear();
        order.extend((0..self.items.len()).filter(|&i| self.items[i].is_active()));
        // Slot as tie-breaker keeps insertion order within a layer.
        order.sort_unstable_by_key(|&i| (self.items[i].layer(), i));
        for &i in &order {
            self.items[i].render(surface);
        }
        self.draw_order.replace(order);
    }

    /// Physically drop inactive entities. Returns how many were removed.
    ///
    /// Call once at the end of a frame, after collision responses; slots
    /// handed out earlier are invalid afterwards.
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.is_active());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
