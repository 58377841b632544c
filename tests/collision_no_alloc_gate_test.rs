use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use arcade::core::{Body, CollisionDetector, Entity, EntitySet, Surface};
use arcade::types::{Rgb, Vec2};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Drifts right and wraps, so overlaps come and go between frames.
struct Drifter {
    body: Body,
}

impl Entity for Drifter {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32) -> Result<(), arcade::core::EntityFault> {
        self.body.integrate(delta);
        if self.body.pos.x > 200.0 {
            self.body.pos.x -= 200.0;
        }
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), Rgb::WHITE);
    }
}

#[test]
fn warm_frame_update_and_scan_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut set = EntitySet::with_capacity(64);
    for i in 0..48 {
        let pos = Vec2::new((i * 7 % 200) as f32, (i * 13 % 120) as f32);
        let vel = Vec2::new(10.0 + i as f32, 0.0);
        set.spawn(Drifter {
            body: Body::new(pos, Vec2::new(8.0, 8.0)).with_velocity(vel),
        });
    }
    let mut detector = CollisionDetector::new();

    // Warm-up: size the scratch buffers for the worst case (everything
    // overlapping everything).
    let stacked: Vec<Drifter> = (0..48)
        .map(|_| Drifter {
            body: Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0)),
        })
        .collect();
    detector.scan(&stacked);
    detector.scan(set.as_slice());

    let mut total_pairs = 0;
    let allocs = with_alloc_counting(|| {
        for _ in 0..300 {
            set.update_all(1.0 / 60.0);
            total_pairs += detector.scan(set.as_slice()).len();
            set.sweep();
        }
    });

    assert_eq!(allocs, 0);
    assert!(total_pairs > 0, "scenario should produce some overlaps");
}
