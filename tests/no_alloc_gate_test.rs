use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use speed_duel::core::{Player, Question, Round, RoundEngine, RoundRules, RoundSnapshot};
use speed_duel::types::{PlayerId, FEEDBACK_WINDOW_MS, TICK_MS};

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

#[test]
fn round_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    // Same-length texts keep snapshot buffers from growing between questions.
    let questions = (0..10)
        .map(|n| Question::new(format!("q{}", n), ["a", "b", "c", "d"], "c", 3))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut game = RoundEngine::new(
        [Player::new("Ada", "blue"), Player::new("Bo", "green")],
        Round::new(questions, None),
        RoundRules::default(),
    );
    let mut snap = RoundSnapshot::default();

    // Warm-up.
    game.snapshot_into(&mut snap);
    let _ = game.tick(TICK_MS);

    let allocs = with_alloc_counting(|| {
        for _ in 0..10 {
            let _ = game.submit(PlayerId::One, 0);
            let _ = game.submit(PlayerId::One, 0);
            for _ in 0..200 {
                let _ = game.tick(TICK_MS);
                game.snapshot_into(&mut snap);
            }
            let _ = game.submit(PlayerId::Two, 2);
            let _ = game.tick(FEEDBACK_WINDOW_MS);
            game.snapshot_into(&mut snap);
        }
    });

    assert!(game.status().is_finished());
    assert_eq!(allocs, 0);
}
