//! Command queue behaviour.

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use led_panel_core::{PlanQueue, PlaybackPlan, QUEUE_CAPACITY, build_plan};

fn numbered_plan(n: u32) -> PlaybackPlan {
    PlaybackPlan::new([1, 0, 0, 0, 0, 0], 10, n)
}

#[test]
fn capacity_is_twenty() {
    let queue = PlanQueue::new();

    assert_eq!(QUEUE_CAPACITY, 20);
    assert_eq!(queue.capacity(), 20);
    assert!(queue.is_empty());
}

#[test]
fn try_send_succeeds_until_full() {
    let queue = PlanQueue::new();

    for n in 0..20 {
        assert!(queue.try_send(numbered_plan(n)), "send {n}");
    }
    assert!(queue.is_full());

    assert!(!queue.try_send(numbered_plan(99)));
    assert_eq!(queue.len(), 20);

    for n in 0..20 {
        assert_eq!(queue.try_receive(), Some(numbered_plan(n)));
    }
    assert_eq!(queue.try_receive(), None);
}

#[test]
fn draining_frees_a_slot() {
    let queue = PlanQueue::new();
    for n in 0..20 {
        queue.try_send(numbered_plan(n));
    }

    assert!(queue.try_receive().is_some());
    assert!(queue.try_send(numbered_plan(20)));
    assert!(!queue.try_send(numbered_plan(21)));
}

#[test]
fn receive_wait_is_fifo() {
    let queue = PlanQueue::new();
    let plans = [build_plan(1, 1), build_plan(2, 2), build_plan(3, 3)];
    for plan in plans {
        assert!(queue.try_send(plan));
    }

    block_on(async {
        for plan in plans {
            assert_eq!(queue.receive_wait(Duration::from_millis(100)).await, Some(plan));
        }
    });
}

#[test]
fn receive_wait_times_out_on_empty_queue() {
    let queue = PlanQueue::new();
    let start = Instant::now();

    let received = block_on(queue.receive_wait(Duration::from_millis(20)));

    assert_eq!(received, None);
    assert!(start.elapsed() >= Duration::from_millis(20));
}
