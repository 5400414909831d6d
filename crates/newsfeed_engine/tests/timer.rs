use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use newsfeed_engine::{TimerHandle, TimerSlot};

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let shared = count.clone();
    let make = move || {
        let shared = shared.clone();
        Box::new(move || {
            shared.fetch_add(1, Ordering::SeqCst);
        }) as Box<dyn FnOnce() + Send>
    };
    (count, make)
}

#[tokio::test(start_paused = true)]
async fn timer_fires_after_delay() {
    let (count, make) = counter();
    let _handle = TimerHandle::start(Duration::from_millis(1000), make());

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_never_fires() {
    let (count, make) = counter();
    let handle = TimerHandle::start(Duration::from_millis(100), make());
    handle.cancel();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_cancels() {
    let (count, make) = counter();
    drop(TimerHandle::start(Duration::from_millis(100), make()));
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn slot_keeps_only_latest_timer() {
    let (count, make) = counter();
    let mut slot = TimerSlot::new();
    for _ in 0..5 {
        slot.replace(Duration::from_millis(1000), make());
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    assert!(slot.is_armed());
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!slot.is_armed());

    slot.replace(Duration::from_millis(10), make());
    slot.cancel();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
