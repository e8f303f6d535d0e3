//! Unix time values.
//!
//! Many web APIs report instants as a count of seconds since the Unix epoch
//! (1970-01-01T00:00:00Z). This module provides the [`UnixTimestamp`] type for
//! such values, along with conversions to and from [`SystemTime`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};
use std::time::{Duration, SystemTime};

/// A Unix timestamp: whole seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// The value is signed, so instants before the epoch are representable.
/// Sub-second precision is discarded on conversion, always rounding towards
/// negative infinity (the same way `date +%s` does).
///
/// # Serialization
///
/// Serialized as a plain JSON integer:
///
/// ```json
/// 1699999999
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(i64);

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Saturates at the bounds of `i64`.
impl Add<i64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

/// Saturates at the bounds of `i64`.
impl Sub<i64> for UnixTimestamp {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

impl From<SystemTime> for UnixTimestamp {
    fn from(value: SystemTime) -> Self {
        Self::from_system_time(value)
    }
}

impl TryFrom<UnixTimestamp> for SystemTime {
    type Error = OutOfRange;

    fn try_from(value: UnixTimestamp) -> Result<Self, Self::Error> {
        value.checked_to_system_time().ok_or(OutOfRange(value.0))
    }
}

/// A Unix time value outside the range of [`SystemTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unix time {0} is outside the range of SystemTime")]
pub struct OutOfRange(pub i64);

impl UnixTimestamp {
    /// The Unix epoch itself (1970-01-01T00:00:00Z).
    pub const EPOCH: Self = Self(0);

    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Computes the Unix time value corresponding to a [`SystemTime`].
    ///
    /// Values too far from the epoch to fit an `i64` saturate.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_secs()).unwrap_or(i64::MAX)),
            Err(before) => {
                let before = before.duration();
                // Partial seconds before the epoch round down to the previous second.
                let carry = i64::from(before.subsec_nanos() > 0);
                Self(0_i64.saturating_sub_unsigned(before.as_secs()).saturating_sub(carry))
            }
        }
    }

    /// Computes the [`SystemTime`] corresponding to this Unix time value, or
    /// `None` if the platform's [`SystemTime`] cannot represent it.
    #[must_use]
    pub fn checked_to_system_time(self) -> Option<SystemTime> {
        let offset = Duration::from_secs(self.0.unsigned_abs());
        if self.0 >= 0 {
            SystemTime::UNIX_EPOCH.checked_add(offset)
        } else {
            SystemTime::UNIX_EPOCH.checked_sub(offset)
        }
    }

    /// Computes the [`SystemTime`] corresponding to this Unix time value.
    ///
    /// # Panics
    ///
    /// Panics if the instant lies outside the range the platform's
    /// [`SystemTime`] can represent; see [`Self::checked_to_system_time`].
    #[must_use]
    pub fn to_system_time(self) -> SystemTime {
        self.checked_to_system_time()
            .expect("unix time outside the range of SystemTime")
    }

    /// Converts an optional [`SystemTime`], keeping `None` as is.
    #[must_use]
    pub fn from_optional(time: Option<SystemTime>) -> Option<Self> {
        time.map(Self::from_system_time)
    }

    /// Converts an optional raw seconds value into an optional [`SystemTime`].
    ///
    /// Values [`SystemTime`] cannot represent also give `None`.
    #[must_use]
    pub fn optional_system_time(secs: Option<i64>) -> Option<SystemTime> {
        secs.and_then(|secs| Self(secs).checked_to_system_time())
    }
}
