//! Derived billing and activity metrics

use crate::types::{MessageRecord, MessageStatus, StatCard, StatVariant};
use crate::utils::format_number;
use crate::{Error, Result};
use serde::Serialize;

/// Warning shown once usage passes the configured threshold
pub const APPROACHING_LIMIT_WARNING: &str =
    "You're approaching your monthly limit. Consider upgrading for more messages.";

/// Consumption of a metered allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMeter {
    used: u64,
    limit: u64,
}

impl UsageMeter {
    /// Create a meter
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUsageLimit`] when `limit` is zero.
    pub fn new(used: u64, limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidUsageLimit { used, limit });
        }
        Ok(Self { used, limit })
    }

    /// Units consumed
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Units allowed
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Exact percentage consumed; may exceed 100
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        100.0 * self.used as f64 / self.limit as f64
    }

    /// Percentage rounded to the nearest integer for display
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percent(&self) -> u64 {
        self.percent().round() as u64
    }

    /// Whether usage is strictly above `threshold` percent
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.percent() > threshold
    }

    /// View model for the usage panel
    #[must_use]
    pub fn summary(&self, threshold: f64, unit: &str) -> UsageSummary {
        UsageSummary {
            used: self.used,
            limit: self.limit,
            percent: self.percent(),
            display_percent: self.rounded_percent(),
            label: format!(
                "{} of {} {unit} used",
                format_number(self.used),
                format_number(self.limit)
            ),
            warning: self
                .exceeds(threshold)
                .then(|| APPROACHING_LIMIT_WARNING.to_string()),
        }
    }
}

/// Usage panel view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Units consumed
    pub used: u64,
    /// Units allowed
    pub limit: u64,
    /// Exact percentage
    pub percent: f64,
    /// Rounded percentage for display
    pub display_percent: u64,
    /// e.g. `1,247 of 2,000 messages used`
    pub label: String,
    /// Present when usage is above the warning threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Message counts by delivery state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Confirmed deliveries
    pub delivered: usize,
    /// Rejected sends
    pub failed: usize,
    /// Awaiting confirmation
    pub pending: usize,
    /// Statuses outside the declared set
    pub other: usize,
}

impl StatusBreakdown {
    /// Count the statuses of `messages`
    pub fn from_messages<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        messages
            .into_iter()
            .fold(Self::default(), |mut acc, message| {
                match message.status {
                    MessageStatus::Delivered => acc.delivered += 1,
                    MessageStatus::Failed => acc.failed += 1,
                    MessageStatus::Pending => acc.pending += 1,
                    MessageStatus::Unknown(_) => acc.other += 1,
                }
                acc
            })
    }

    /// Total messages counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.delivered + self.failed + self.pending + self.other
    }

    /// Delivered share in percent, `None` for an empty set
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn delivery_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(100.0 * self.delivered as f64 / total as f64),
        }
    }
}

/// Direction of a stat card's change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Higher than yesterday
    Up,
    /// Lower than yesterday
    Down,
    /// Unchanged or unknown
    Flat,
}

impl Trend {
    /// Classify a percent change
    #[must_use]
    pub fn of(change: Option<f64>) -> Self {
        match change {
            Some(c) if c > 0.0 => Self::Up,
            Some(c) if c < 0.0 => Self::Down,
            _ => Self::Flat,
        }
    }
}

/// Stat card with its trend worked out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCardView {
    /// Card title
    pub title: String,
    /// Pre-formatted value
    pub value: String,
    /// Visual emphasis
    pub variant: StatVariant,
    /// Direction of change
    pub trend: Trend,
    /// e.g. `+12% from yesterday`; absent when flat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_label: Option<String>,
}

impl From<&StatCard> for StatCardView {
    fn from(card: &StatCard) -> Self {
        let trend = Trend::of(card.change);
        let change_label = match (trend, card.change) {
            (Trend::Up, Some(change)) => Some(format!("+{change}% from yesterday")),
            (Trend::Down, Some(change)) => Some(format!("{change}% from yesterday")),
            _ => None,
        };

        Self {
            title: card.title.clone(),
            value: card.value.clone(),
            variant: card.variant,
            trend,
            change_label,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::fixtures::sample_seed;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1247, 2000, 62, false)]
    #[case(1700, 2000, 85, true)]
    #[case(100, 2000, 5, false)]
    #[case(1600, 2000, 80, false)]
    #[case(2500, 2000, 125, true)]
    fn test_usage_percent(
        #[case] used: u64,
        #[case] limit: u64,
        #[case] display: u64,
        #[case] warns: bool,
    ) {
        let meter = UsageMeter::new(used, limit).unwrap();
        assert_eq!(meter.rounded_percent(), display);
        assert_eq!(meter.exceeds(80.0), warns);
        assert_eq!(meter.summary(80.0, "messages").warning.is_some(), warns);
    }

    #[test]
    fn test_exact_percent() {
        let meter = UsageMeter::new(1247, 2000).unwrap();
        assert_eq!(meter.percent(), 62.35);
        assert_eq!(meter.used(), 1247);
        assert_eq!(meter.limit(), 2000);
    }

    #[test]
    fn test_zero_limit_is_an_error() {
        let err = UsageMeter::new(5, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidUsageLimit { used: 5, limit: 0 }));
    }

    #[test]
    fn test_summary_label_and_warning() {
        let summary = UsageMeter::new(1700, 2000).unwrap().summary(80.0, "messages");

        assert_eq!(summary.label, "1,700 of 2,000 messages used");
        assert_eq!(summary.display_percent, 85);
        assert_eq!(summary.warning.as_deref(), Some(APPROACHING_LIMIT_WARNING));

        let quiet = UsageMeter::new(1247, 2000).unwrap().summary(80.0, "messages");
        assert_eq!(quiet.label, "1,247 of 2,000 messages used");
        assert!(quiet.warning.is_none());
    }

    #[test]
    fn test_status_breakdown_from_sample() {
        let seed = sample_seed().unwrap();
        let breakdown = StatusBreakdown::from_messages(&seed.messages);

        assert_eq!(
            breakdown,
            StatusBreakdown {
                delivered: 4,
                failed: 1,
                pending: 1,
                other: 0,
            }
        );
        assert_eq!(breakdown.total(), 6);
        let rate = breakdown.delivery_rate().unwrap();
        assert!((rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_delivery_rate_of_empty_set() {
        let breakdown = StatusBreakdown::from_messages(&Vec::<MessageRecord>::new());
        assert_eq!(breakdown.total(), 0);
        assert!(breakdown.delivery_rate().is_none());
    }

    #[rstest]
    #[case(Some(12.0), Trend::Up, Some("+12% from yesterday"))]
    #[case(Some(2.1), Trend::Up, Some("+2.1% from yesterday"))]
    #[case(Some(-15.0), Trend::Down, Some("-15% from yesterday"))]
    #[case(Some(0.0), Trend::Flat, None)]
    #[case(None, Trend::Flat, None)]
    fn test_stat_card_trend(
        #[case] change: Option<f64>,
        #[case] trend: Trend,
        #[case] label: Option<&str>,
    ) {
        let card = StatCard {
            title: "Calls Today".to_string(),
            value: "189".to_string(),
            change,
            variant: StatVariant::Primary,
        };
        let view = StatCardView::from(&card);

        assert_eq!(view.trend, trend);
        assert_eq!(view.change_label.as_deref(), label);
        assert_eq!(view.variant, StatVariant::Primary);
    }
}
