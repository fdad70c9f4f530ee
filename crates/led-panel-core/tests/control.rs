//! Control page request handling end to end.

use led_panel_core::{
    BodyError, ControlPanel, PlanQueue, PlaybackPlan, Selection, build_plan, control::status,
};

const PAGE: &[u8] = b"<!DOCTYPE html><html><body>control</body></html>";

#[test]
fn page_is_served_unchanged() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let reply = panel.page();

    assert_eq!(reply.status, status::OK);
    assert_eq!(reply.body, PAGE);
    assert!(queue.is_empty());
}

#[test]
fn page_does_not_depend_on_previous_posts() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);
    let before = panel.page();

    panel.submit(b"mode=3&speed=2");
    panel.submit(b"garbage");
    let _ = panel.receive_failed(BodyError::Timeout);

    assert_eq!(panel.page(), before);
}

#[test]
fn valid_post_enqueues_one_plan() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let submission = panel.submit(b"mode=1&speed=1");

    assert_eq!(submission.selection, Selection::new(1, 1));
    assert_eq!(
        submission.plan,
        PlaybackPlan::new([1, 2, 4, 8, 0, 8], 1000, 17)
    );
    assert!(submission.enqueued);
    assert_eq!(submission.reply.status, status::OK);
    assert_eq!(submission.reply.body, PAGE);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.try_receive(), Some(build_plan(1, 1)));
}

#[test]
fn malformed_post_still_enqueues_noop_plan() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let submission = panel.submit(b"mode=?&speed=?");

    assert!(submission.enqueued);
    assert!(submission.plan.is_noop());
    assert_eq!(submission.plan.channel_masks(), [0; 6]);
    assert_eq!(submission.plan.step_delay_ms(), 1000);
    assert_eq!(submission.reply.status, status::OK);
}

#[test]
fn flood_of_posts_drops_past_capacity() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let submissions: Vec<_> = (0..25).map(|_| panel.submit(b"mode=2&speed=3")).collect();

    let enqueued = submissions.iter().filter(|s| s.enqueued).count();
    assert_eq!(enqueued, 20);
    assert!(submissions[20..].iter().all(|s| !s.enqueued));
    assert!(submissions.iter().all(|s| s.reply.status == status::OK));
    assert_eq!(queue.len(), 20);
}

#[test]
fn receive_timeout_maps_to_408() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let reply = panel.receive_failed(BodyError::Timeout);

    assert_eq!(reply.status, 408);
    assert!(reply.body.is_empty());
    assert!(queue.is_empty());
}

#[test]
fn other_receive_failure_maps_to_500() {
    let queue = PlanQueue::new();
    let panel = ControlPanel::new(&queue, PAGE);

    let reply = panel.receive_failed(BodyError::Other);

    assert_eq!(reply.status, 500);
    assert!(queue.is_empty());
}
