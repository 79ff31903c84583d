use crate::{Events, MatchClock};

/// Advance the match clock by one tick
pub fn advance_clock(clock: &mut MatchClock, events: &mut Events) {
    if clock.expired() {
        return;
    }
    clock.tick();
    events.clock_ticked = true;
}
