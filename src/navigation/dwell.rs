//! Cancellable dwell timer for the guided tour.
//!
//! At most one advance is ever pending. Every arm or cancel bumps an epoch;
//! a pending entry only fires if it was armed in the current epoch, so a
//! stale arrival can never advance the tour late.

/// Single-slot deferred "advance the tour" on the simulation clock
#[derive(Debug, Clone)]
pub struct DwellTimer {
    delay_s: f32,
    epoch: u64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    epoch: u64,
    due_s: f64,
}

impl DwellTimer {
    pub fn new(delay_s: f32) -> Self {
        Self {
            delay_s,
            epoch: 0,
            pending: None,
        }
    }

    pub fn delay_s(&self) -> f32 {
        self.delay_s
    }

    /// Current epoch; changes on every arm and cancel
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time the pending advance is due, if any
    pub fn due_s(&self) -> Option<f64> {
        self.pending.map(|p| p.due_s)
    }

    /// Schedule an advance `delay_s` after `now_s`, replacing any pending one
    pub fn arm(&mut self, now_s: f64) -> u64 {
        self.epoch += 1;
        self.pending = Some(Pending {
            epoch: self.epoch,
            due_s: now_s + f64::from(self.delay_s),
        });
        self.epoch
    }

    /// Drop any pending advance
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    /// True exactly once, on the first poll at or after the due time of a
    /// still-current arm
    pub fn poll(&mut self, now_s: f64) -> bool {
        match self.pending {
            Some(p) if p.epoch != self.epoch => {
                self.pending = None;
                false
            }
            Some(p) if now_s >= p.due_s => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = DwellTimer::new(6.0);
        timer.arm(1.0);
        assert!(!timer.poll(6.9));
        assert!(timer.poll(7.0));
        assert!(!timer.poll(8.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut timer = DwellTimer::new(6.0);
        timer.arm(0.0);
        timer.cancel();
        assert!(!timer.poll(100.0));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut timer = DwellTimer::new(6.0);
        let first = timer.arm(0.0);
        let second = timer.arm(4.0);
        assert!(second > first);
        assert!(!timer.poll(6.0));
        assert!(timer.poll(10.0));
    }

    #[test]
    fn test_epoch_bumps_on_every_change() {
        let mut timer = DwellTimer::new(1.0);
        let e0 = timer.epoch();
        timer.arm(0.0);
        let e1 = timer.epoch();
        timer.cancel();
        assert!(e0 < e1 && e1 < timer.epoch());
    }

    #[test]
    fn test_fires_after_days_of_runtime() {
        // Past 2^19 s an f32 clock can no longer resolve the dwell delay
        let mut timer = DwellTimer::new(6.0);
        let start = 3.0e6;
        timer.arm(start);
        assert!(!timer.poll(start + 5.99));
        assert!(timer.poll(start + 6.0));
    }
}
