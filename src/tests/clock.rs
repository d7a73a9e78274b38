use super::auction_time;
use crate::clock::*;
use chrono::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

#[test]
fn now_only_moves_on_tick() {
    let source = Arc::new(ManualClock::new(auction_time()));
    let clock = TickingClock::new(source.clone());

    source.advance(Duration::seconds(5));
    assert_eq!(clock.now(), auction_time());

    assert_eq!(clock.tick(), auction_time() + Duration::seconds(5));
    assert_eq!(clock.now(), auction_time() + Duration::seconds(5));
}

#[test]
fn subscribers_see_each_tick_until_unsubscribed() {
    let source = Arc::new(ManualClock::new(auction_time()));
    let clock = TickingClock::new(source.clone());
    let seen = Arc::new(Mutex::new(vec![]));

    let subscription = clock.subscribe({
        let seen = seen.clone();
        move |now| seen.lock().push(now)
    });
    assert_eq!(clock.subscriber_count(), 1);

    clock.tick();
    source.set(auction_time() + Duration::seconds(60));
    clock.tick();

    assert!(clock.unsubscribe(subscription));
    assert!(!clock.unsubscribe(subscription));
    clock.tick();

    assert_eq!(
        *seen.lock(),
        vec![auction_time(), auction_time() + Duration::seconds(60)]
    );
}
