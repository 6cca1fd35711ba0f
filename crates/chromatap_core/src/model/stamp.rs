//! Entity ids and ISO-8601 timestamps.
//!
//! Ids look like `proj_<base36 millis>_<6 random base36 chars>`. They are
//! practically unique for one local store; collisions are not checked.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use uuid::Uuid;

/// Timestamp type used on every persisted entity.
pub type Timestamp = DateTime<Utc>;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_ID_CHARS: u32 = 6;

/// Entity kinds that carry generated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Project,
    Palette,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Project => "proj",
            Self::Palette => "pal",
        }
    }

    /// Whether `id` carries this kind's `<prefix>_` marker.
    pub fn matches(self, id: &str) -> bool {
        id.strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|rest| !rest.is_empty())
    }
}

/// Generates a fresh id for `kind`.
pub fn generate_id(kind: IdKind) -> String {
    let millis = u128::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let random = Uuid::new_v4().as_u128() % 36u128.pow(RANDOM_ID_CHARS);
    format!(
        "{}_{}_{}",
        kind.prefix(),
        to_base36(millis, 1),
        to_base36(random, RANDOM_ID_CHARS as usize)
    )
}

/// Current time truncated to the millisecond precision that is persisted.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Returns a timestamp strictly later than `previous`.
///
/// Uses the wall clock when it has moved past `previous`, otherwise bumps
/// `previous` by one millisecond.
pub fn next_after(previous: Timestamp) -> Timestamp {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Formats as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_base36(mut value: u128, min_width: usize) -> String {
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    while digits.len() < min_width {
        digits.push(b'0');
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Serde adapter reading and writing timestamps with millisecond precision.
///
/// Finer input is truncated on read so a later write reproduces the value.
pub mod iso_millis {
    use super::{format_timestamp, Timestamp};
    use chrono::{DateTime, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|err| serde::de::Error::custom(format!("invalid timestamp `{raw}`: {err}")))
    }
}
