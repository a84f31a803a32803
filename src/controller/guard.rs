use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// At most one call of an action at a time
#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    /// `None` while another call holds the slot
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }
}

/// Frees the slot when dropped, including when the call's future is dropped
#[derive(Debug)]
pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Hands out increasing tickets; only the newest one may render
#[derive(Debug, Default)]
pub struct LatestOnly(AtomicU64);

impl LatestOnly {
    pub fn ticket(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Acquire) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_single_holder() {
        let slot = InFlight::default();

        let guard = slot.try_acquire();
        assert!(guard.is_some());
        assert!(slot.try_acquire().is_none());

        drop(guard);
        assert!(slot.try_acquire().is_some());
    }

    #[test]
    fn test_latest_only() {
        let latest = LatestOnly::default();

        let first = latest.ticket();
        let second = latest.ticket();
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }
}
