//! Client configuration types.

use governor::Quota;
use std::num::NonZeroU32;

/// Client-side request throttle.
///
/// deSEC rate-limits RRset writes per account; a run with many documents can
/// stay under that limit by pacing its own requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Sustained requests per second
    pub per_second: NonZeroU32,

    /// Requests allowed back-to-back before pacing kicks in
    pub burst: NonZeroU32,
}

impl RateLimit {
    /// Allow `per_second` requests per second with no burst
    #[must_use]
    pub const fn new(per_second: NonZeroU32) -> Self {
        Self {
            per_second,
            burst: NonZeroU32::MIN,
        }
    }

    /// Build from a plain number; zero means "no limit"
    #[must_use]
    pub fn from_per_second(per_second: u32) -> Option<Self> {
        NonZeroU32::new(per_second).map(Self::new)
    }

    /// Set the burst size
    #[must_use]
    pub const fn burst(mut self, burst: NonZeroU32) -> Self {
        self.burst = burst;
        self
    }

    pub(crate) fn quota(&self) -> Quota {
        Quota::per_second(self.per_second).allow_burst(self.burst)
    }
}
