use super::ValidationError;
use std::fmt;

/// How soon a product expires, relative to some reference date.
///
/// The variants are declared from most to least urgent, so sorting by
/// `Urgency` puts the products that need attention first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Urgency {
    /// Already expired, or expiring within the critical window ("red")
    ExpiredOrCritical,
    /// Expiring within the warning window ("yellow")
    Warning,
    /// Nothing to worry about yet ("green")
    Ok,
}

impl Urgency {
    /// Every bucket, most urgent first.
    pub const ALL: [Urgency; 3] = [Self::ExpiredOrCritical, Self::Warning, Self::Ok];

    /// The colour a presentation layer uses for this bucket.
    pub fn colour(self) -> &'static str {
        match self {
            Self::ExpiredOrCritical => "red",
            Self::Warning => "yellow",
            Self::Ok => "green",
        }
    }

    /// The wire name of the bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpiredOrCritical => "EXPIRED_OR_CRITICAL",
            Self::Warning => "WARNING",
            Self::Ok => "OK",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The day counts that partition `days_remaining` into urgency buckets and
/// decide when a warning message is raised.
///
/// With the defaults:
///
/// | days remaining | urgency               |
/// |----------------|-----------------------|
/// | `> 365`        | `OK`                  |
/// | `91 ..= 365`   | `WARNING`             |
/// | `<= 90`        | `EXPIRED_OR_CRITICAL` |
///
/// and a warning is raised for `0 ..= 30` days remaining ("expires in") and
/// for any negative count ("is expired").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Products with strictly more days remaining than this are `OK`
    #[cfg_attr(feature = "serde", serde(default = "default_ok_after_days"))]
    pub ok_after_days: i64,

    /// Products with strictly more days remaining than this (and not `OK`) are `WARNING`
    #[cfg_attr(feature = "serde", serde(default = "default_warning_after_days"))]
    pub warning_after_days: i64,

    /// Products with between zero and this many days remaining raise an "expires in" warning
    #[cfg_attr(feature = "serde", serde(default = "default_alert_within_days"))]
    pub alert_within_days: i64,
}

fn default_ok_after_days() -> i64 {
    365
}

fn default_warning_after_days() -> i64 {
    90
}

fn default_alert_within_days() -> i64 {
    30
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ok_after_days: default_ok_after_days(),
            warning_after_days: default_warning_after_days(),
            alert_within_days: default_alert_within_days(),
        }
    }
}

impl Thresholds {
    /// Check that the thresholds describe a usable partition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.warning_after_days > self.ok_after_days {
            return Err(ValidationError::Thresholds(
                "warning_after_days must not exceed ok_after_days",
            ));
        }
        if self.alert_within_days < 0 {
            return Err(ValidationError::Thresholds(
                "alert_within_days must not be negative",
            ));
        }
        Ok(())
    }

    /// Bucket a remaining-day count. Total over all of `i64`.
    pub fn urgency(&self, days_remaining: i64) -> Urgency {
        if days_remaining > self.ok_after_days {
            Urgency::Ok
        } else if days_remaining > self.warning_after_days {
            Urgency::Warning
        } else {
            Urgency::ExpiredOrCritical
        }
    }
}

/// Number of products per urgency bucket.
///
/// All three buckets are always present, most urgent first, so that a report
/// of an empty catalog still lists every bucket with a zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BucketCounts(indexmap::IndexMap<Urgency, usize, rustc_hash::FxBuildHasher>);

impl Default for BucketCounts {
    fn default() -> Self {
        Self(Urgency::ALL.into_iter().map(|urgency| (urgency, 0)).collect())
    }
}

impl BucketCounts {
    /// Count one more product in `urgency`.
    pub fn record(&mut self, urgency: Urgency) {
        *self.0.entry(urgency).or_default() += 1;
    }

    /// The number of products in `urgency`.
    pub fn get(&self, urgency: Urgency) -> usize {
        self.0.get(&urgency).copied().unwrap_or_default()
    }

    /// The number of products across all buckets.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterate over `(bucket, count)` pairs, most urgent first.
    pub fn iter(&self) -> impl Iterator<Item = (Urgency, usize)> + '_ {
        self.0.iter().map(|(urgency, count)| (*urgency, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partition_boundaries() {
        let thresholds = Thresholds::default();

        assert_eq!(thresholds.urgency(i64::MAX), Urgency::Ok);
        assert_eq!(thresholds.urgency(366), Urgency::Ok);
        assert_eq!(thresholds.urgency(365), Urgency::Warning);
        assert_eq!(thresholds.urgency(91), Urgency::Warning);
        assert_eq!(thresholds.urgency(90), Urgency::ExpiredOrCritical);
        assert_eq!(thresholds.urgency(0), Urgency::ExpiredOrCritical);
        assert_eq!(thresholds.urgency(-1), Urgency::ExpiredOrCritical);
        assert_eq!(thresholds.urgency(i64::MIN), Urgency::ExpiredOrCritical);
    }

    #[test]
    fn buckets_are_monotone() {
        let thresholds = Thresholds::default();
        let mut previous = thresholds.urgency(-1000);
        for days in -999..=1000 {
            let current = thresholds.urgency(days);
            assert!(current >= previous, "bucket regressed at {days} days");
            previous = current;
        }
    }

    #[test]
    fn validation() {
        assert!(Thresholds::default().validate().is_ok());

        let inverted = Thresholds {
            ok_after_days: 90,
            warning_after_days: 365,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ValidationError::Thresholds(_))
        ));

        let negative_alert = Thresholds {
            alert_within_days: -1,
            ..Default::default()
        };
        assert!(negative_alert.validate().is_err());

        // A collapsed warning bucket is allowed
        let two_buckets = Thresholds {
            ok_after_days: 90,
            warning_after_days: 90,
            ..Default::default()
        };
        assert!(two_buckets.validate().is_ok());
        assert_eq!(two_buckets.urgency(91), Urgency::Ok);
        assert_eq!(two_buckets.urgency(90), Urgency::ExpiredOrCritical);
    }

    #[test]
    fn counts_start_at_zero_in_order() {
        let mut counts = BucketCounts::default();
        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![
                (Urgency::ExpiredOrCritical, 0),
                (Urgency::Warning, 0),
                (Urgency::Ok, 0)
            ]
        );

        counts.record(Urgency::Ok);
        counts.record(Urgency::Ok);
        counts.record(Urgency::ExpiredOrCritical);
        assert_eq!(counts.get(Urgency::Ok), 2);
        assert_eq!(counts.get(Urgency::Warning), 0);
        assert_eq!(counts.total(), 3);
    }
}
