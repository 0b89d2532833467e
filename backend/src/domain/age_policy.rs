//! Minimum-age rule gating user deletion.
//!
//! Stored `createdAt` values reach the domain as [`StoredTimestamp`]s.
//! Adapters call [`StoredTimestamp::normalize`] before handing a record to
//! the domain, so the policy itself only ever compares `DateTime<Utc>`.

use chrono::{DateTime, TimeZone, Utc};

/// Reference deletion threshold: one minute.
pub const DEFAULT_MINIMUM_AGE_MS: i64 = 60_000;

/// Return `true` when at least `threshold_ms` milliseconds separate
/// `created_at` from `now`.
///
/// The boundary is inclusive. A `created_at` later than `now` never meets a
/// non-negative threshold.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use user_registry::domain::meets_minimum_age;
///
/// let created = Utc::now();
/// assert!(!meets_minimum_age(created, created + Duration::milliseconds(59_999), 60_000));
/// assert!(meets_minimum_age(created, created + Duration::milliseconds(60_000), 60_000));
/// ```
pub fn meets_minimum_age(created_at: DateTime<Utc>, now: DateTime<Utc>, threshold_ms: i64) -> bool {
    (now - created_at).num_milliseconds() >= threshold_ms
}

/// Deletion policy carrying the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionPolicy {
    minimum_age_ms: i64,
}

impl DeletionPolicy {
    /// Build a policy with an explicit threshold in milliseconds.
    #[must_use]
    pub const fn new(minimum_age_ms: i64) -> Self {
        Self { minimum_age_ms }
    }

    /// Configured threshold in milliseconds.
    #[must_use]
    pub const fn minimum_age_ms(&self) -> i64 {
        self.minimum_age_ms
    }

    /// Whether a record created at `created_at` may be deleted at `now`.
    #[must_use]
    pub fn permits(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        meets_minimum_age(created_at, now, self.minimum_age_ms)
    }
}

impl Default for DeletionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_AGE_MS)
    }
}

/// Raw `createdAt` shapes a document store may hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredTimestamp {
    /// Already a native timestamp.
    Native(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// RFC 3339 text, any offset.
    Rfc3339(String),
}

/// Failure converting a [`StoredTimestamp`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampNormalizationError {
    /// Epoch milliseconds outside chrono's representable range.
    #[error("epoch milliseconds {0} are out of range")]
    OutOfRange(i64),
    /// Text that is not RFC 3339.
    #[error("timestamp {value:?} is not RFC 3339")]
    Unparseable {
        /// The offending text.
        value: String,
    },
}

impl StoredTimestamp {
    /// Convert to the canonical UTC timestamp.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::StoredTimestamp;
    ///
    /// let from_millis = StoredTimestamp::EpochMillis(1_700_000_000_123).normalize().expect("millis");
    /// let from_text = StoredTimestamp::Rfc3339("2023-11-14T22:13:20.123Z".to_owned())
    ///     .normalize()
    ///     .expect("text");
    /// assert_eq!(from_millis, from_text);
    /// ```
    pub fn normalize(self) -> Result<DateTime<Utc>, TimestampNormalizationError> {
        match self {
            Self::Native(value) => Ok(value),
            Self::EpochMillis(millis) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .ok_or(TimestampNormalizationError::OutOfRange(millis)),
            Self::Rfc3339(value) => DateTime::parse_from_rfc3339(&value)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| TimestampNormalizationError::Unparseable { value }),
        }
    }
}

impl From<DateTime<Utc>> for StoredTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Native(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    #[case(0, false)]
    #[case(59_999, false)]
    #[case(60_000, true)]
    #[case(60_001, true)]
    #[case(-1, false)]
    fn threshold_is_inclusive(
        created_at: DateTime<Utc>,
        #[case] elapsed_ms: i64,
        #[case] expected: bool,
    ) {
        let now = created_at + Duration::milliseconds(elapsed_ms);
        assert_eq!(meets_minimum_age(created_at, now, 60_000), expected);
    }

    #[rstest]
    fn default_policy_uses_one_minute(created_at: DateTime<Utc>) {
        let policy = DeletionPolicy::default();
        assert_eq!(policy.minimum_age_ms(), DEFAULT_MINIMUM_AGE_MS);
        assert!(!policy.permits(created_at, created_at + Duration::seconds(59)));
        assert!(policy.permits(created_at, created_at + Duration::seconds(60)));
    }

    #[rstest]
    fn zero_threshold_permits_immediate_deletion(created_at: DateTime<Utc>) {
        assert!(DeletionPolicy::new(0).permits(created_at, created_at));
    }

    #[rstest]
    fn every_representation_normalises_to_the_same_instant(created_at: DateTime<Utc>) {
        let native = StoredTimestamp::Native(created_at).normalize();
        let millis = StoredTimestamp::EpochMillis(created_at.timestamp_millis()).normalize();
        let text = StoredTimestamp::Rfc3339("2026-03-01T18:00:00+09:00".to_owned()).normalize();

        assert_eq!(native, Ok(created_at));
        assert_eq!(millis, Ok(created_at));
        assert_eq!(text, Ok(created_at));
    }

    #[rstest]
    fn millisecond_precision_survives_normalisation() {
        let normalised = StoredTimestamp::EpochMillis(1_772_355_600_007)
            .normalize()
            .expect("in range");
        assert_eq!(normalised.timestamp_millis(), 1_772_355_600_007);
    }

    #[rstest]
    fn unparseable_text_is_reported() {
        let result = StoredTimestamp::Rfc3339("yesterday".to_owned()).normalize();
        assert_eq!(
            result,
            Err(TimestampNormalizationError::Unparseable {
                value: "yesterday".to_owned()
            })
        );
    }

    #[rstest]
    fn out_of_range_millis_are_reported() {
        let result = StoredTimestamp::EpochMillis(i64::MAX).normalize();
        assert_eq!(result, Err(TimestampNormalizationError::OutOfRange(i64::MAX)));
    }
}
