use std::time::{Duration, Instant};

/// Quiet period after the last selection change before `on_change` fires
pub const CHANGE_DELAY: Duration = Duration::from_millis(20);

/// Delay between picking the final date and closing the dialog when
/// auto-closing is enabled
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(50);

/// A value waiting to be delivered once a quiet period has passed.
///
/// Scheduling a new value while one is pending replaces it and restarts the
/// timer, so a burst of changes is delivered once, with the last value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deferred<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Deferred<T> {
    pub fn new(delay: Duration) -> Deferred<T> {
        Deferred {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|&(deadline, _)| deadline)
    }

    /// Takes the pending value if its deadline has been reached
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.cancel(),
            _ => None,
        }
    }
}

/// Detects the dialog going from open to closed.
///
/// Starting out closed does not count as an edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CloseEdge {
    was_open: bool,
}

impl CloseEdge {
    pub fn new(is_open: bool) -> CloseEdge {
        CloseEdge { was_open: is_open }
    }

    /// Records the current open state and returns `true` if the dialog has
    /// just closed
    pub fn observe(&mut self, is_open: bool) -> bool {
        let closed = self.was_open && !is_open;
        self.was_open = is_open;
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_coalesces() {
        let start = Instant::now();
        let mut d = Deferred::new(CHANGE_DELAY);
        d.schedule(start, 1);
        d.schedule(start + Duration::from_millis(5), 2);
        d.schedule(start + Duration::from_millis(10), 3);
        assert_eq!(d.poll(start + Duration::from_millis(25)), None);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(30)));
        assert_eq!(d.poll(start + Duration::from_millis(30)), Some(3));
        assert_eq!(d.poll(start + Duration::from_millis(100)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_deferred_cancel() {
        let start = Instant::now();
        let mut d = Deferred::new(AUTO_CLOSE_DELAY);
        d.schedule(start, ());
        assert_eq!(d.cancel(), Some(()));
        assert_eq!(d.poll(start + AUTO_CLOSE_DELAY), None);
    }

    #[test]
    fn test_close_edge() {
        let mut edge = CloseEdge::new(false);
        assert!(!edge.observe(false));
        assert!(!edge.observe(true));
        assert!(!edge.observe(true));
        assert!(edge.observe(false));
        assert!(!edge.observe(false));
        let mut edge = CloseEdge::new(true);
        assert!(edge.observe(false));
    }
}
