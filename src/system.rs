// File: ./src/system.rs
/*! Access to the host clock and timezone.

Everything that needs "now" or the host UTC offset goes through a
`SystemResolver`, so row normalization stays deterministic in tests and the
Android side can hand over the offset it computed itself.
*/
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

pub trait SystemResolver: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;

    /// UTC offset of the host timezone at the given instant.
    fn utc_offset_at(&self, at: DateTime<Utc>) -> FixedOffset;

    /// Offset at the current moment, not at any event's moment.
    fn current_offset(&self) -> FixedOffset {
        self.utc_offset_at(self.now())
    }
}

/// Host clock and the process' local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalResolver;

impl SystemResolver for LocalResolver {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn utc_offset_at(&self, at: DateTime<Utc>) -> FixedOffset {
        Local.offset_from_utc_datetime(&at.naive_utc()).fix()
    }
}

/// A frozen clock with a constant offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedResolver {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedResolver {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Builds a resolver from an offset in milliseconds, as reported by
    /// `java.util.TimeZone#getOffset`. Returns `None` for offsets beyond ±24h.
    pub fn from_offset_millis(now: DateTime<Utc>, offset_millis: i64) -> Option<Self> {
        let secs = i32::try_from(offset_millis / 1000).ok()?;
        Some(Self::new(now, FixedOffset::east_opt(secs)?))
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl SystemResolver for FixedResolver {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn utc_offset_at(&self, _at: DateTime<Utc>) -> FixedOffset {
        self.offset
    }
}
