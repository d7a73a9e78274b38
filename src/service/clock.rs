use super::*;
use crate::clock::{SharedTickingClock, SubscriptionId};
use std::time::Instant;
use tracing::trace;

/// How often the ticker checks whether it is time to tick
const POLL: Duration = Duration::from_millis(100);

/// Advances the shared clock on a fixed interval
///
/// Subscribes a writer of [`Event::ClockTicked`] on creation and
/// unsubscribes it when dropped, so no tick is published after teardown.
pub struct ClockTicker {
    clock: SharedTickingClock,
    interval: Duration,
    last_tick: Instant,
    subscription: SubscriptionId,
}

impl ClockTicker {
    pub fn new(
        clock: SharedTickingClock,
        interval: Duration,
        event_writer: event_log::SharedWriter,
    ) -> Self {
        let subscription = clock.subscribe(move |now| {
            if let Err(e) = event_writer.write(&[Event::ClockTicked(now)]) {
                error!(error = ?e, "failed to publish clock tick");
            }
        });

        Self {
            clock,
            interval,
            last_tick: Instant::now(),
            subscription,
        }
    }
}

impl LoopService for ClockTicker {
    fn run_iteration(&mut self) -> Result<()> {
        // don't hog the cpu
        thread::sleep(POLL.min(self.interval));

        if self.last_tick.elapsed() >= self.interval {
            self.last_tick = Instant::now();
            let now = self.clock.tick();
            trace!(%now, "tick");
        }
        Ok(())
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.clock.unsubscribe(self.subscription);
    }
}
