//! Incremental pass scheduling against the growing transcript.

/// Decides when the transcript has grown enough to warrant another
/// extraction pass.
///
/// A pass triggers once the transcript exceeds `min_chars` and its length
/// modulo `modulus` falls inside the leading `window`. Lengths that jump
/// over the window in a single burst skip that pass entirely; the next
/// window, or the final pass at stop, picks the content up instead.
#[derive(Debug, Clone)]
pub struct PassScheduler {
    min_chars: usize,
    modulus: usize,
    window: usize,
}

impl Default for PassScheduler {
    fn default() -> Self {
        Self::new(200, 100, 10)
    }
}

impl PassScheduler {
    pub fn new(min_chars: usize, modulus: usize, window: usize) -> Self {
        Self {
            min_chars,
            modulus,
            window,
        }
    }

    /// Whether a pass should run at this transcript length.
    pub fn should_trigger(&self, transcript_len: usize) -> bool {
        if self.modulus == 0 {
            return false;
        }
        transcript_len > self.min_chars && transcript_len % self.modulus < self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_triggers_at_or_below_minimum() {
        let scheduler = PassScheduler::default();
        for len in 0..=200 {
            assert!(
                !scheduler.should_trigger(len),
                "length {} must not trigger",
                len
            );
        }
    }

    #[test]
    fn test_triggers_inside_window_above_minimum() {
        let scheduler = PassScheduler::default();
        assert!(scheduler.should_trigger(201));
        assert!(scheduler.should_trigger(205));
        assert!(scheduler.should_trigger(209));
        assert!(scheduler.should_trigger(300));
        assert!(scheduler.should_trigger(309));
        assert!(scheduler.should_trigger(1003));
    }

    #[test]
    fn test_silent_between_windows() {
        let scheduler = PassScheduler::default();
        assert!(!scheduler.should_trigger(210));
        assert!(!scheduler.should_trigger(250));
        assert!(!scheduler.should_trigger(299));
        assert!(!scheduler.should_trigger(1050));
    }

    #[test]
    fn test_burst_can_skip_a_window() {
        // A single append from 195 to 215 never lands inside 200..210, so
        // no length in between would have triggered.
        let scheduler = PassScheduler::default();
        assert!(!scheduler.should_trigger(195));
        assert!(!scheduler.should_trigger(215));
    }

    #[test]
    fn test_custom_thresholds() {
        let scheduler = PassScheduler::new(50, 20, 5);
        assert!(!scheduler.should_trigger(50));
        assert!(scheduler.should_trigger(61));
        assert!(!scheduler.should_trigger(55));
        assert!(scheduler.should_trigger(80));
    }

    #[test]
    fn test_zero_modulus_disables_triggering() {
        let scheduler = PassScheduler::new(200, 0, 10);
        assert!(!scheduler.should_trigger(500));
    }
}
