use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};

/// Accepts items whose age is within the recency window plus a grace margin.
#[derive(Debug, Clone, Copy)]
pub struct FreshnessFilter {
    window: Duration,
    grace_percent: u32,
}

impl FreshnessFilter {
    pub fn new(window: Duration, grace_percent: u32) -> Self {
        Self {
            window,
            grace_percent,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Maximum accepted age: the window stretched by the grace margin.
    pub fn allowance(&self) -> Duration {
        let seconds = self.window.num_seconds();
        Duration::seconds(seconds + seconds * i64::from(self.grace_percent) / 100)
    }

    /// Unparseable dates are never fresh. Future dates are, since only the
    /// age upper bound is checked.
    pub fn is_within_window(&self, published_raw: &str, now: DateTime<Utc>) -> bool {
        match parse_published(published_raw) {
            Some(published) => now.signed_duration_since(published) <= self.allowance(),
            None => false,
        }
    }
}

pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a publication date in the given UTC offset, falling back to the
/// first 16 characters of the raw string when it does not parse.
pub fn display_date(raw: &str, offset_hours: i32) -> String {
    if raw.trim().is_empty() {
        return "No date".to_string();
    }
    let offset = offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    match parse_published(raw) {
        Some(dt) => dt.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string(),
        None => raw.chars().take(16).collect(),
    }
}
