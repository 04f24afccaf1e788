//! Native scalar types carried by model fields.

use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

// re-export so model authors get the URL type without naming the crate
pub use url::Url;

///
/// Timestamp
/// (in seconds)
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    FromStr,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MIN: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// Construct from milliseconds (truncate to seconds).
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms / 1_000)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Render as an RFC 3339 / ISO-8601 UTC string.
    ///
    /// `None` only when the value exceeds the calendar range of the backing
    /// date library.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        let secs = i64::try_from(self.0).ok()?;
        let datetime = OffsetDateTime::from_unix_timestamp(secs).ok()?;

        datetime.format(&Rfc3339).ok()
    }

    /// Parse an RFC 3339 / ISO-8601 string. Pre-epoch instants are rejected.
    #[must_use]
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        let datetime = OffsetDateTime::parse(s, &Rfc3339).ok()?;
        let secs = u64::try_from(datetime.unix_timestamp()).ok()?;

        Some(Self(secs))
    }
}
