//! Payment countdowns: time left until a virtual account expires, and the
//! short redirect countdown shown after a successful payment.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::shared::constants::EXPIRED_TEXT;

/// WIB offset used by the payment gateway for naive timestamps
const WIB_OFFSET_SECS: i32 = 7 * 3600;

const TICK: Duration = Duration::from_secs(1);

/// Remaining time until a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(Duration),
    Expired,
}

impl Countdown {
    pub fn from_remaining(left: Duration) -> Self {
        if left.is_zero() {
            Countdown::Expired
        } else {
            Countdown::Remaining(left)
        }
    }

    pub fn until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match (expiry - now).to_std() {
            Ok(left) => Self::from_remaining(left),
            Err(_) => Countdown::Expired,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}

impl fmt::Display for Countdown {
    /// `HH:MM:SS` (hours keep counting past 24) or `Expired`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Expired => f.write_str(EXPIRED_TEXT),
            Countdown::Remaining(left) => {
                let secs = left.as_secs();
                write!(
                    f,
                    "{:02}:{:02}:{:02}",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
        }
    }
}

fn wib() -> FixedOffset {
    FixedOffset::east_opt(WIB_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Calendar date in the village's time zone
pub fn wib_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&wib()).date_naive()
}

/// Parse the gateway's expiry time.
///
/// Accepts RFC 3339, or `YYYY-MM-DD HH:MM:SS` which the gateway emits in WIB.
pub fn parse_expiry_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    wib()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Emit the remaining time once per second until it reaches [`Countdown::Expired`].
///
/// Stops early when `cancel` fires or the receiver goes away. Reaching expiry
/// only ends the stream; it does not touch the transaction.
pub async fn run_expiry_countdown(
    remaining: Duration,
    tx: mpsc::Sender<Countdown>,
    cancel: CancellationToken,
) {
    let deadline = Instant::now() + remaining;
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let state = Countdown::from_remaining(deadline.saturating_duration_since(Instant::now()));
        if tx.send(state).await.is_err() {
            tracing::debug!("Countdown receiver dropped");
            break;
        }
        if state.is_expired() {
            break;
        }
    }
}

/// One step of the post-payment redirect countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTick {
    SecondsLeft(u64),
    Redirect,
}

/// Count down from `seconds` to 1, then emit [`RedirectTick::Redirect`]
pub async fn run_redirect_countdown(
    seconds: u64,
    tx: mpsc::Sender<RedirectTick>,
    cancel: CancellationToken,
) {
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for left in (0..=seconds).rev() {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let tick = if left == 0 {
            RedirectTick::Redirect
        } else {
            RedirectTick::SecondsLeft(left)
        };
        if tx.send(tick).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_format_hours_minutes_seconds() {
        let c = Countdown::Remaining(Duration::from_secs(3 * 3600 + 25 * 60 + 7));
        assert_eq!(c.to_string(), "03:25:07");

        let long = Countdown::Remaining(Duration::from_secs(26 * 3600));
        assert_eq!(long.to_string(), "26:00:00");
    }

    #[test]
    fn test_until_past_deadline_is_expired() {
        let now = Utc::now();
        let expiry = now + ChronoDuration::seconds(10);

        assert_eq!(Countdown::until(expiry, now).to_string(), "00:00:10");
        assert_eq!(
            Countdown::until(expiry, now + ChronoDuration::seconds(10)).to_string(),
            "Expired"
        );
        assert_eq!(
            Countdown::until(expiry, now + ChronoDuration::seconds(11)).to_string(),
            "Expired"
        );
    }

    #[test]
    fn test_wib_date_rolls_over_before_utc() {
        let late_utc = parse_expiry_time("2025-01-01T18:30:00Z").unwrap();
        assert_eq!(wib_date(late_utc), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_expiry_time_formats() {
        let rfc = parse_expiry_time("2025-01-02T10:00:00Z").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2025-01-02T10:00:00+00:00");

        // Gateway timestamps are WIB (UTC+7)
        let wib = parse_expiry_time("2025-01-02 17:00:00").unwrap();
        assert_eq!(wib, rfc);

        assert!(parse_expiry_time("besok").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_countdown_ends_with_expired() {
        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(run_expiry_countdown(
            Duration::from_secs(10),
            tx,
            CancellationToken::new(),
        ));

        let mut seen = Vec::new();
        while let Some(state) = rx.recv().await {
            seen.push(state.to_string());
        }

        assert_eq!(seen.first().map(String::as_str), Some("00:00:10"));
        assert_eq!(seen.last().map(String::as_str), Some("Expired"));
        assert_eq!(seen.len(), 11);
        assert_eq!(seen.iter().filter(|s| *s == "Expired").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_countdown_stops_on_cancel() {
        let (tx, mut rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_expiry_countdown(
            Duration::from_secs(3600),
            tx,
            cancel.clone(),
        ));

        assert!(rx.recv().await.is_some());
        cancel.cancel();
        handle.await.unwrap();
        // Drain anything buffered before the cancel, then the channel closes
        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_countdown_from_ten() {
        let (tx, mut rx) = mpsc::channel(16);
        tokio::spawn(run_redirect_countdown(10, tx, CancellationToken::new()));

        let mut ticks = Vec::new();
        while let Some(tick) = rx.recv().await {
            ticks.push(tick);
        }

        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], RedirectTick::SecondsLeft(10));
        assert_eq!(ticks[9], RedirectTick::SecondsLeft(1));
        assert_eq!(ticks[10], RedirectTick::Redirect);
    }
}
