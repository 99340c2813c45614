//! Build version stamping
//!
//! Every build gets a `version_id` derived from the local wall clock, shaped
//! `TIME_<YYYYMMDDhhmmss>_<mmm>`. Tokens sort lexicographically in build order at
//! millisecond granularity, and need no git checkout or counter file.

use chrono::{DateTime, Local, TimeZone, Timelike};
use std::fmt;

/// Prefix shared by every version token
pub const VERSION_PREFIX: &str = "TIME_";

/// A point in time used to stamp one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionStamp {
    at: DateTime<Local>,
}

impl VersionStamp {
    /// Stamp with the current local time
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    /// Stamp with an explicit time
    pub fn at<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self {
            at: at.with_timezone(&Local),
        }
    }

    /// Render the version token
    pub fn version_id(&self) -> String {
        // chrono reports leap seconds as nanos >= 1_000_000_000
        let millis = (self.at.nanosecond() / 1_000_000).min(999);
        format!(
            "{}{}_{:03}",
            VERSION_PREFIX,
            self.at.format("%Y%m%d%H%M%S"),
            millis
        )
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version_id())
    }
}

/// Version token for a build starting now
pub fn version_id_now() -> String {
    VersionStamp::now().version_id()
}

/// Check that a string has the shape of a version token
pub fn is_version_id(candidate: &str) -> bool {
    let Some(rest) = candidate.strip_prefix(VERSION_PREFIX) else {
        return false;
    };
    let Some((clock, millis)) = rest.split_once('_') else {
        return false;
    };
    clock.len() == 14
        && millis.len() == 3
        && clock.bytes().all(|b| b.is_ascii_digit())
        && millis.bytes().all(|b| b.is_ascii_digit())
}
