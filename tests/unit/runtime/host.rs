use super::*;

#[test]
fn timers_pop_in_deadline_order_and_fifo_on_ties() {
    let mut q = TimerQueue::new();
    let late = q.register_timer(FrameDelay(200));
    let a = q.register_timer(FrameDelay(100));
    let b = q.register_timer(FrameDelay(100));

    assert_eq!(q.peek_deadline(), Some(Duration::from_millis(100)));
    assert_eq!(q.pop_next(), Some((a, Duration::from_millis(100))));
    assert_eq!(q.pop_next(), Some((b, Duration::from_millis(100))));
    assert_eq!(q.pop_next(), Some((late, Duration::from_millis(200))));
    assert_eq!(q.pop_next(), None);
}

#[test]
fn delays_are_relative_to_current_time() {
    let mut q = TimerQueue::new();
    q.advance_to(Duration::from_millis(500));
    q.advance_to(Duration::from_millis(100));
    assert_eq!(q.now(), Duration::from_millis(500));
    let h = q.register_timer(FrameDelay(1));
    assert_eq!(q.pop_next(), Some((h, Duration::from_millis(501))));
}

#[test]
fn cancel_removes_only_the_named_timer() {
    let mut q = TimerQueue::new();
    let a = q.register_timer(FrameDelay(10));
    let b = q.register_timer(FrameDelay(20));
    assert!(q.cancel_timer(a));
    assert!(!q.cancel_timer(a));
    assert_eq!(q.len(), 1);
    assert_eq!(q.pop_next().map(|(h, _)| h), Some(b));
    assert!(q.is_empty());
}

#[test]
fn dirty_flag_is_consumed_once() {
    let mut q = TimerQueue::new();
    assert!(!q.take_dirty());
    q.mark_dirty();
    q.mark_dirty();
    assert!(q.take_dirty());
    assert!(!q.take_dirty());
}
