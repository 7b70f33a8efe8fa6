//! Anchor-based regenerating resource pools.

use chrono::{Duration, NaiveDateTime};

/// Regeneration state. A pool below its cap always carries the anchor its
/// next tick is measured from; a full pool carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regen {
    Full,
    Refilling { anchor: NaiveDateTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePool {
    current: u32,
    cap: u32,
    interval: Duration,
    regen: Regen,
}

impl ResourcePool {
    pub fn full(cap: u32, interval: Duration) -> Self {
        Self {
            current: cap,
            cap,
            interval,
            regen: Regen::Full,
        }
    }

    /// Empty pool whose first tick is measured from `anchor`.
    pub fn empty(cap: u32, interval: Duration, anchor: NaiveDateTime) -> Self {
        let regen = if cap == 0 {
            Regen::Full
        } else {
            Regen::Refilling { anchor }
        };
        Self {
            current: 0,
            cap,
            interval,
            regen,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.cap
    }

    pub fn anchor(&self) -> Option<NaiveDateTime> {
        match self.regen {
            Regen::Full => None,
            Regen::Refilling { anchor } => Some(anchor),
        }
    }

    /// Applies every tick due at or before `until`. Each tick adds one unit
    /// and either clears the anchor (cap reached) or moves it forward by one
    /// interval. Returns the number of ticks applied.
    pub fn recalc(&mut self, until: NaiveDateTime) -> u32 {
        let mut ticks = 0;
        while let Regen::Refilling { anchor } = self.regen {
            let due = anchor + self.interval;
            if due > until {
                break;
            }
            self.current += 1;
            ticks += 1;
            self.regen = if self.current >= self.cap {
                Regen::Full
            } else {
                Regen::Refilling { anchor: due }
            };
        }
        ticks
    }

    /// Spends `amount` units. Spending from a full pool starts the regen
    /// clock at `now`; spending from a refilling pool keeps its anchor.
    pub fn consume(&mut self, amount: u32, now: NaiveDateTime) -> bool {
        if amount == 0 || self.current < amount {
            return amount == 0;
        }
        if self.regen == Regen::Full {
            self.regen = Regen::Refilling { anchor: now };
        }
        self.current -= amount;
        true
    }

    /// Fills the pool immediately.
    pub fn refill_to_cap(&mut self) {
        self.current = self.current.max(self.cap);
        self.regen = Regen::Full;
    }

    /// Moves a pending anchor to `now`, discarding partial progress towards
    /// the next tick.
    pub fn restart_anchor(&mut self, now: NaiveDateTime) {
        if let Regen::Refilling { .. } = self.regen {
            self.regen = Regen::Refilling { anchor: now };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> NaiveDateTime {
        NaiveDateTime::default()
    }

    fn hours(h: i64) -> Duration {
        Duration::hours(h)
    }

    fn assert_invariant(pool: &ResourcePool) {
        assert_eq!(pool.anchor().is_none(), pool.current() == pool.cap());
    }

    #[test]
    fn test_consume_at_cap_sets_anchor() {
        let mut pool = ResourcePool::full(2, hours(12));
        assert!(pool.consume(1, t0() + hours(3)));
        assert_eq!(pool.anchor(), Some(t0() + hours(3)));
        assert_invariant(&pool);
    }

    #[test]
    fn test_consume_below_cap_keeps_anchor() {
        let mut pool = ResourcePool::full(2, hours(12));
        pool.consume(1, t0());
        assert!(pool.consume(1, t0() + hours(5)));
        assert_eq!(pool.anchor(), Some(t0()));
        assert_eq!(pool.current(), 0);
        assert!(!pool.consume(1, t0() + hours(6)));
        assert_invariant(&pool);
    }

    #[test]
    fn test_one_interval_adds_exactly_one() {
        let mut pool = ResourcePool::full(2, hours(12));
        pool.consume(1, t0());
        pool.consume(1, t0());

        assert_eq!(pool.recalc(t0() + hours(11)), 0);
        assert_eq!(pool.current(), 0);

        assert_eq!(pool.recalc(t0() + hours(12)), 1);
        assert_eq!(pool.current(), 1);
        assert_eq!(pool.anchor(), Some(t0() + hours(12)));

        assert_eq!(pool.recalc(t0() + hours(24)), 1);
        assert_eq!(pool.current(), 2);
        assert_eq!(pool.anchor(), None);
        assert_invariant(&pool);
    }

    #[test]
    fn test_long_gap_drains_all_ticks_and_stops_at_cap() {
        let mut pool = ResourcePool::full(5, hours(12));
        pool.consume(5, t0());
        assert_eq!(pool.recalc(t0() + hours(1_000)), 5);
        assert!(pool.is_full());
        assert_invariant(&pool);
    }

    #[test]
    fn test_refill_and_restart() {
        let mut pool = ResourcePool::empty(2, hours(24), t0());
        assert_invariant(&pool);
        pool.restart_anchor(t0() + hours(30));
        assert_eq!(pool.recalc(t0() + hours(40)), 0);
        assert_eq!(pool.recalc(t0() + hours(54)), 1);
        pool.refill_to_cap();
        assert_eq!(pool.current(), 2);
        assert_invariant(&pool);
        pool.restart_anchor(t0());
        assert_eq!(pool.anchor(), None);
    }
}
