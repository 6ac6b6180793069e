//! Scheduler for running periodic catalog sweeps.
//!
//! The scheduler is configured with an optional start time and a frequency.
//! Execution times are aligned to `from + k * every`, so a restart does not
//! shift the schedule.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{Instrument as _, Level, event, span};

/// Configuration for scheduling a periodic task.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// An RFC3339 timestamp to start the schedule from (if omitted, defaults to now)
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub from: Option<OffsetDateTime>,
    /// How often to run; the task is disabled when omitted. Must not be zero.
    #[serde(
        serialize_with = "humantime_serde::option::serialize",
        deserialize_with = "non_zero_interval",
        default
    )]
    pub every: Option<Duration>,
}

fn non_zero_interval<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    let every: Option<Duration> = humantime_serde::option::deserialize(deserializer)?;
    if every.is_some_and(|every| every.is_zero()) {
        return Err(de::Error::custom("`every` must be a non-zero duration"));
    }
    Ok(every)
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

impl Scheduler {
    /// The first execution time of the form `from + k * delta` at or after
    /// `now`. `delta` must be non-zero.
    fn anchor(&self, delta: Duration, now: OffsetDateTime) -> OffsetDateTime {
        match self.from {
            Some(from) if from < now => {
                let step = delta.as_nanos();
                let offset = (now - from).unsigned_abs().as_nanos().div_ceil(step) * step;
                from + Duration::new(
                    (offset / NANOS_PER_SEC) as u64,
                    (offset % NANOS_PER_SEC) as u32,
                )
            }
            Some(from) => from,
            None => now,
        }
    }

    /// Execute `f` at regular intervals until it fails.
    ///
    /// Returns `Ok(())` immediately if no interval (or a zero interval) is
    /// configured, otherwise only returns the first error `f` produces.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use sltserver::Scheduler;
    ///
    /// # async fn example() -> Result<(), String> {
    /// let scheduler = Scheduler {
    ///     from: None,
    ///     every: Some(Duration::from_secs(3600)),
    /// };
    ///
    /// scheduler
    ///     .schedule(async |timestamp| {
    ///         println!("Sweeping at {timestamp}");
    ///         Ok::<(), String>(())
    ///     })
    ///     .await
    /// # }
    /// ```
    pub async fn schedule<T, E>(
        &self,
        f: impl AsyncFn(OffsetDateTime) -> Result<T, E>,
    ) -> Result<(), E> {
        let Some(delta) = self.every.filter(|every| !every.is_zero()) else {
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();
        let mut anchor = self.anchor(delta, now);

        // anchor >= now, so the conversion only fails if the clocks disagree
        let sleepy: Duration = (anchor - now).try_into().unwrap_or_default();
        tokio::time::sleep(sleepy).await;

        let mut interval = tokio::time::interval(delta);

        loop {
            interval.tick().await;

            let span = span!(Level::INFO, "running scheduled sweep");
            async {
                event!(Level::INFO, sweep_time = %anchor);
                f(anchor).await
            }
            .instrument(span)
            .await?;

            anchor += delta;
        }
    }
}
