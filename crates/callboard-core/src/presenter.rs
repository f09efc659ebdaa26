//! Turns records into display rows
//!
//! Presentation is pure: records are borrowed, never mutated, and every
//! status value (declared or not) maps to a badge.

use crate::config::DisplayConfig;
use crate::types::{
    ActivityEvent, ActivityKind, ActivityStatus, CallRecord, CallStatus, InvoiceRecord,
    InvoiceStatus, MessageRecord, MessageStatus, MessageTemplate, TemplateStatus,
};
use crate::utils::{format_number, format_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::warn;

/// Semantic color of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Positive outcome
    Success,
    /// Needs attention
    Warning,
    /// Failure
    Destructive,
    /// In progress or inactive
    Muted,
    /// No particular meaning
    Neutral,
}

impl Tone {
    /// Utility classes a UI primitives library applies for this tone
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "bg-success/10 text-success",
            Self::Warning => "bg-warning/10 text-warning",
            Self::Destructive => "bg-destructive/10 text-destructive",
            Self::Muted => "bg-muted text-muted-foreground",
            Self::Neutral => "",
        }
    }
}

/// Icon name shown inside a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    /// Check mark in a circle
    CheckCircle,
    /// Cross in a circle
    XCircle,
    /// Clock face
    Clock,
    /// Exclamation mark in a circle
    AlertCircle,
}

/// A rendered status badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Text shown on the badge
    pub label: String,
    /// Semantic color
    pub tone: Tone,
    /// Leading icon, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// CSS classes for the tone
    pub class: &'static str,
}

impl Badge {
    /// Build a badge
    pub fn new(label: impl Into<String>, tone: Tone, icon: Option<Icon>) -> Self {
        Self {
            label: label.into(),
            tone,
            icon,
            class: tone.css_class(),
        }
    }
}

/// Status values that render as a badge
pub trait BadgeStyle {
    /// Tone and icon for this value
    fn style(&self) -> (Tone, Option<Icon>);

    /// Badge label
    fn label(&self) -> &str;

    /// The rendered badge
    fn badge(&self) -> Badge {
        let (tone, icon) = self.style();
        Badge::new(self.label(), tone, icon)
    }
}

impl BadgeStyle for CallStatus {
    fn style(&self) -> (Tone, Option<Icon>) {
        match self {
            Self::Completed => (Tone::Success, None),
            Self::Missed => (Tone::Warning, None),
            Self::Unknown(_) => (Tone::Neutral, None),
        }
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

impl BadgeStyle for MessageStatus {
    fn style(&self) -> (Tone, Option<Icon>) {
        match self {
            Self::Delivered => (Tone::Success, Some(Icon::CheckCircle)),
            Self::Failed => (Tone::Destructive, Some(Icon::XCircle)),
            Self::Pending => (Tone::Muted, Some(Icon::Clock)),
            Self::Unknown(_) => (Tone::Neutral, None),
        }
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

impl BadgeStyle for InvoiceStatus {
    fn style(&self) -> (Tone, Option<Icon>) {
        match self {
            Self::Paid => (Tone::Success, Some(Icon::CheckCircle)),
            Self::Unknown(_) => (Tone::Neutral, None),
        }
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

impl BadgeStyle for TemplateStatus {
    fn style(&self) -> (Tone, Option<Icon>) {
        match self {
            Self::Active => (Tone::Success, Some(Icon::CheckCircle)),
            Self::Draft => (Tone::Muted, Some(Icon::Clock)),
            Self::Unknown(_) => (Tone::Neutral, None),
        }
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

// The activity feed only distinguishes success from everything else.
impl BadgeStyle for ActivityStatus {
    fn style(&self) -> (Tone, Option<Icon>) {
        match self {
            Self::Delivered | Self::Completed => (Tone::Success, Some(Icon::CheckCircle)),
            Self::Failed | Self::Unknown(_) => (Tone::Destructive, Some(Icon::AlertCircle)),
        }
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

/// Formatting settings applied to every row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    time_format: String,
    placeholder: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DisplayOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            time_format: config.time_format.clone(),
            placeholder: config.placeholder.clone(),
        }
    }
}

impl DisplayOptions {
    /// Text used for absent values
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Short time of day, or the placeholder when absent
    #[must_use]
    pub fn format_time(&self, timestamp: Option<&NaiveDateTime>) -> String {
        let Some(timestamp) = timestamp else {
            return self.placeholder.clone();
        };
        format_timestamp(timestamp, &self.time_format).unwrap_or_else(|| {
            warn!(pattern = %self.time_format, "time format could not be rendered");
            self.placeholder.clone()
        })
    }

    /// The value, or the placeholder when absent or blank
    #[must_use]
    pub fn or_placeholder(&self, value: Option<&str>) -> String {
        value
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| self.placeholder.clone(), ToString::to_string)
    }
}

/// Records that can be shown as a table row
pub trait RowPresenter {
    /// Row view model
    type Row: Serialize;

    /// Column headers, in display order
    const COLUMNS: &'static [&'static str];

    /// Render one record
    fn present(&self, options: &DisplayOptions) -> Self::Row;
}

/// Column headers plus rendered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table<T> {
    /// Column headers
    pub columns: Vec<&'static str>,
    /// Rendered rows
    pub rows: Vec<T>,
}

/// Renders record slices with shared display options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePresenter {
    options: DisplayOptions,
}

impl TablePresenter {
    /// Create a presenter
    #[must_use]
    pub const fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    /// Display options in use
    #[must_use]
    pub const fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Render a single record
    pub fn row<R: RowPresenter>(&self, record: &R) -> R::Row {
        record.present(&self.options)
    }

    /// Render `records` in order
    pub fn table<R: RowPresenter>(&self, records: &[&R]) -> Table<R::Row> {
        Table {
            columns: R::COLUMNS.to_vec(),
            rows: records.iter().map(|record| self.row(*record)).collect(),
        }
    }
}

/// Call-log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRow {
    /// Call id
    pub id: String,
    /// Phone number
    pub phone: String,
    /// `m:ss`
    pub duration: String,
    /// Agent name
    pub agent: String,
    /// Call outcome badge
    pub call_status: Badge,
    /// Follow-up message badge
    pub message_status: Badge,
    /// Channel, or the placeholder
    pub channel: String,
    /// Short time of the call
    pub time: String,
}

impl RowPresenter for CallRecord {
    type Row = CallRow;

    const COLUMNS: &'static [&'static str] = &[
        "Call ID",
        "Phone Number",
        "Duration",
        "Agent",
        "Call Status",
        "Message",
        "Channel",
        "Time",
    ];

    fn present(&self, options: &DisplayOptions) -> CallRow {
        CallRow {
            id: self.id.clone(),
            phone: self.phone.clone(),
            duration: self.duration_label(),
            agent: self.agent.clone(),
            call_status: self.call_status.badge(),
            message_status: self.message_status.badge(),
            channel: options.or_placeholder(self.channel.as_ref().map(|c| c.as_str())),
            time: options.format_time(Some(&self.timestamp)),
        }
    }
}

/// Message-log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    /// Message id
    pub id: String,
    /// Triggering call id
    pub call_id: String,
    /// Recipient
    pub phone: String,
    /// Template name
    pub template: String,
    /// Channel
    pub channel: String,
    /// Delivery badge
    pub status: Badge,
    /// Short send time
    pub sent_at: String,
    /// Short delivery time, or the placeholder
    pub delivered_at: String,
    /// Provider error, or the placeholder
    pub error: String,
}

impl RowPresenter for MessageRecord {
    type Row = MessageRow;

    const COLUMNS: &'static [&'static str] = &[
        "Message ID",
        "Call ID",
        "Phone Number",
        "Template",
        "Channel",
        "Status",
        "Sent At",
        "Delivered At",
    ];

    fn present(&self, options: &DisplayOptions) -> MessageRow {
        MessageRow {
            id: self.id.clone(),
            call_id: self.call_id.clone(),
            phone: self.phone.clone(),
            template: self.template.clone(),
            channel: self.channel.to_string(),
            status: self.status.badge(),
            sent_at: options.format_time(Some(&self.sent_at)),
            delivered_at: options.format_time(self.delivered_at.as_ref()),
            error: options.or_placeholder(self.error.as_deref()),
        }
    }
}

/// Invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRow {
    /// Invoice number
    pub id: String,
    /// Issue date
    pub date: String,
    /// Amount
    pub amount: String,
    /// Settlement badge
    pub status: Badge,
}

impl RowPresenter for InvoiceRecord {
    type Row = InvoiceRow;

    const COLUMNS: &'static [&'static str] = &["Invoice", "Date", "Amount", "Status"];

    fn present(&self, _options: &DisplayOptions) -> InvoiceRow {
        InvoiceRow {
            id: self.id.clone(),
            date: self.date.clone(),
            amount: self.amount.clone(),
            status: self.status.badge(),
        }
    }
}

/// Template gallery card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCard {
    /// Template number
    pub id: u32,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Channel
    pub channel: String,
    /// Publication badge
    pub status: Badge,
    /// e.g. `Used 1,247 times`
    pub usage: String,
    /// Body preview
    pub preview: String,
}

impl RowPresenter for MessageTemplate {
    type Row = TemplateCard;

    const COLUMNS: &'static [&'static str] =
        &["Name", "Description", "Channel", "Status", "Usage", "Preview"];

    fn present(&self, _options: &DisplayOptions) -> TemplateCard {
        TemplateCard {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            channel: self.channel.to_string(),
            status: self.status.badge(),
            usage: format!("Used {} times", format_number(self.usage_count)),
            preview: self.preview.clone(),
        }
    }
}

/// Recent activity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    /// Feed position
    pub id: u32,
    /// `call` or `message`
    pub kind: String,
    /// Customer phone
    pub customer: String,
    /// Call duration or message channel
    pub detail: String,
    /// Outcome badge
    pub status: Badge,
    /// Relative time
    pub time: String,
}

impl RowPresenter for ActivityEvent {
    type Row = ActivityRow;

    const COLUMNS: &'static [&'static str] = &["Customer", "Detail", "Status", "Time"];

    fn present(&self, options: &DisplayOptions) -> ActivityRow {
        let detail = match (&self.kind, &self.duration) {
            (ActivityKind::Call, Some(duration)) => format!("Call duration: {duration}"),
            _ => options.or_placeholder(self.channel.as_deref()),
        };

        ActivityRow {
            id: self.id,
            kind: self.kind.to_string(),
            customer: self.customer.clone(),
            detail,
            status: self.status.badge(),
            time: self.time.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::sample_seed;
    use crate::types::Declared;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(MessageStatus::Delivered, Tone::Success, Some(Icon::CheckCircle))]
    #[case(MessageStatus::Failed, Tone::Destructive, Some(Icon::XCircle))]
    #[case(MessageStatus::Pending, Tone::Muted, Some(Icon::Clock))]
    #[case(MessageStatus::from("bounced"), Tone::Neutral, None)]
    fn test_message_status_badges(
        #[case] status: MessageStatus,
        #[case] tone: Tone,
        #[case] icon: Option<Icon>,
    ) {
        let badge = status.badge();
        assert_eq!(badge.tone, tone);
        assert_eq!(badge.icon, icon);
        assert_eq!(badge.label, status.as_str());
    }

    #[rstest]
    #[case(CallStatus::Completed, Tone::Success)]
    #[case(CallStatus::Missed, Tone::Warning)]
    #[case(CallStatus::from("voicemail"), Tone::Neutral)]
    fn test_call_status_badges(#[case] status: CallStatus, #[case] tone: Tone) {
        assert_eq!(status.badge().tone, tone);
    }

    #[rstest]
    #[case(ActivityStatus::Delivered, Tone::Success, Icon::CheckCircle)]
    #[case(ActivityStatus::Completed, Tone::Success, Icon::CheckCircle)]
    #[case(ActivityStatus::Failed, Tone::Destructive, Icon::AlertCircle)]
    #[case(ActivityStatus::from("queued"), Tone::Destructive, Icon::AlertCircle)]
    fn test_activity_badges(#[case] status: ActivityStatus, #[case] tone: Tone, #[case] icon: Icon) {
        let badge = status.badge();
        assert_eq!(badge.tone, tone);
        assert_eq!(badge.icon, Some(icon));
    }

    #[test]
    fn test_every_declared_value_has_a_styled_badge() {
        assert!(CallStatus::declared().iter().all(|s| s.badge().tone != Tone::Neutral));
        assert!(MessageStatus::declared().iter().all(|s| s.badge().tone != Tone::Neutral));
        assert!(InvoiceStatus::declared().iter().all(|s| s.badge().tone != Tone::Neutral));
        assert!(TemplateStatus::declared().iter().all(|s| s.badge().tone != Tone::Neutral));
    }

    #[test]
    fn test_badge_class_follows_tone() {
        let badge = TemplateStatus::Draft.badge();
        assert_eq!(badge.class, "bg-muted text-muted-foreground");
        assert_eq!(InvoiceStatus::from("void").badge().class, "");
    }

    #[test]
    fn test_badge_serializes_icon_names() {
        let json = serde_json::to_value(MessageStatus::Failed.badge()).unwrap();
        assert_eq!(json["icon"], "x-circle");
        assert_eq!(json["tone"], "destructive");
        assert_eq!(json["label"], "failed");
    }

    #[test]
    fn test_call_row() {
        let seed = sample_seed().unwrap();
        let presenter = TablePresenter::default();

        let first = presenter.row(seed.calls.first().unwrap());
        assert_eq!(first.time, "02:32 PM");
        assert_eq!(first.duration, "4:32");
        assert_eq!(first.channel, "WhatsApp");

        let missed = presenter.row(seed.calls.get(3).unwrap());
        assert_eq!(missed.channel, "-");
        assert_eq!(missed.call_status.tone, Tone::Warning);
    }

    #[test]
    fn test_pending_message_renders_placeholder() {
        let seed = sample_seed().unwrap();
        let presenter = TablePresenter::default();
        let pending = seed.messages.iter().find(|m| m.id == "MSG-006").unwrap();

        let row = presenter.row(pending);
        assert_eq!(row.delivered_at, "-");
        assert_eq!(row.sent_at, "01:35 PM");
        assert_eq!(row.error, "-");
    }

    #[test]
    fn test_custom_display_options() {
        let config = DisplayConfig {
            time_format: "%H:%M".to_string(),
            placeholder: "n/a".to_string(),
        };
        let presenter = TablePresenter::new(DisplayOptions::from(&config));
        let seed = sample_seed().unwrap();
        let failed = seed.messages.iter().find(|m| m.id == "MSG-003").unwrap();

        let row = presenter.row(failed);
        assert_eq!(row.sent_at, "14:16");
        assert_eq!(row.delivered_at, "n/a");
        assert_eq!(row.error, "Invalid number format");
    }

    #[test]
    fn test_table_keeps_columns_and_order() {
        let seed = sample_seed().unwrap();
        let visible: Vec<&InvoiceRecord> = seed.invoices.iter().rev().collect();

        let table = TablePresenter::default().table(&visible);
        assert_eq!(table.columns, vec!["Invoice", "Date", "Amount", "Status"]);
        let ids: Vec<&str> = table.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["INV-2023-010", "INV-2023-011", "INV-2023-012", "INV-2024-001"]
        );
    }

    #[test]
    fn test_template_card_usage_label() {
        let seed = sample_seed().unwrap();
        let card = TablePresenter::default().row(seed.templates.first().unwrap());

        assert_eq!(card.usage, "Used 1,247 times");
        assert_eq!(card.status.tone, Tone::Success);
    }

    #[test]
    fn test_activity_detail() {
        let seed = sample_seed().unwrap();
        let presenter = TablePresenter::default();

        let message = presenter.row(seed.activity.first().unwrap());
        assert_eq!(message.detail, "WhatsApp");

        let call = presenter.row(seed.activity.get(1).unwrap());
        assert_eq!(call.detail, "Call duration: 4:32");
        assert_eq!(call.kind, "call");
    }
}
