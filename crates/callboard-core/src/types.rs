//! Core data types for the callboard dashboard

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Enumerations whose declared values can be selected from user input
pub trait Declared: Sized {
    /// Parse one of the declared values, ignoring ASCII case and surrounding
    /// whitespace. Anything else yields `None`.
    fn parse_declared(value: &str) -> Option<Self>;

    /// Every declared value, in display order
    fn declared() -> Vec<Self>;
}

/// Declares an open string enumeration: the listed variants plus an
/// `Unknown(String)` catch-all that keeps unrecognized labels verbatim.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the declared set, kept as received
            Unknown(String),
        }

        impl $name {
            /// Label shown to users
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }
        }

        impl Declared for $name {
            fn parse_declared(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($label) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            fn declared() -> Vec<Self> {
                vec![ $( Self::$variant ),+ ]
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse_declared(&value).unwrap_or(Self::Unknown(value))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::parse_declared(value).unwrap_or_else(|| Self::Unknown(value.to_string()))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// Outcome of a phone call
    pub enum CallStatus {
        /// Call was answered and finished normally
        Completed => "completed",
        /// Call was not answered
        Missed => "missed",
    }
}

open_enum! {
    /// Delivery state of a follow-up message
    pub enum MessageStatus {
        /// Provider confirmed delivery
        Delivered => "delivered",
        /// Provider rejected the message
        Failed => "failed",
        /// Sent, awaiting confirmation
        Pending => "pending",
    }
}

open_enum! {
    /// Messaging channel
    pub enum Channel {
        /// WhatsApp Business
        WhatsApp => "WhatsApp",
        /// Plain SMS
        Sms => "SMS",
    }
}

open_enum! {
    /// Invoice settlement state
    pub enum InvoiceStatus {
        /// Settled
        Paid => "paid",
    }
}

open_enum! {
    /// Publication state of a message template
    pub enum TemplateStatus {
        /// Used for automated sends
        Active => "active",
        /// Not yet published
        Draft => "draft",
    }
}

open_enum! {
    /// Kind of entry in the recent activity feed
    pub enum ActivityKind {
        /// A phone call
        Call => "call",
        /// An outbound message
        Message => "message",
    }
}

open_enum! {
    /// Status shown for an activity feed entry
    pub enum ActivityStatus {
        /// Message delivered
        Delivered => "delivered",
        /// Call completed
        Completed => "completed",
        /// Message failed
        Failed => "failed",
    }
}

/// A logged phone call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CallRecord {
    /// Unique call identifier, e.g. `CL-001`
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// Caller phone number as displayed
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    /// Call length in seconds
    pub duration_seconds: u32,

    /// Agent who handled the call
    #[validate(length(max = 128))]
    pub agent: String,

    /// Call outcome
    pub call_status: CallStatus,

    /// State of the follow-up message
    pub message_status: MessageStatus,

    /// Channel of the follow-up message, absent when none was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,

    /// When the call happened
    pub timestamp: NaiveDateTime,
}

impl CallRecord {
    /// Call length as `m:ss`
    #[must_use]
    pub fn duration_label(&self) -> String {
        crate::utils::format_clock_duration(self.duration_seconds)
    }
}

/// An outbound message sent after a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MessageRecord {
    /// Unique message identifier, e.g. `MSG-001`
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// Call that triggered this message
    #[validate(length(min = 1, max = 64))]
    pub call_id: String,

    /// Recipient phone number as displayed
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    /// Template name used for the message body
    pub template: String,

    /// Channel the message went out on
    pub channel: Channel,

    /// Delivery state
    pub status: MessageStatus,

    /// When the message was handed to the provider
    pub sent_at: NaiveDateTime,

    /// When delivery was confirmed
    #[serde(default)]
    pub delivered_at: Option<NaiveDateTime>,

    /// Provider error for failed messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageRecord {
    /// Check that the delivery fields agree with the status
    ///
    /// # Errors
    ///
    /// Returns a validation error when `delivered_at` is set for an
    /// undelivered message, missing for a delivered one, or when a failed
    /// message carries no error reason.
    pub fn check_delivery(&self) -> crate::Result<()> {
        let delivered = self.status == MessageStatus::Delivered;
        match (delivered, self.delivered_at.is_some()) {
            (true, false) => {
                return Err(crate::Error::validation(
                    "delivered_at",
                    format!("message {} is delivered but has no delivery time", self.id),
                ));
            }
            (false, true) => {
                return Err(crate::Error::validation(
                    "delivered_at",
                    format!(
                        "message {} has a delivery time but status {}",
                        self.id, self.status
                    ),
                ));
            }
            _ => {}
        }

        let has_reason = self.error.as_deref().is_some_and(|e| !e.trim().is_empty());
        if self.status == MessageStatus::Failed && !has_reason {
            return Err(crate::Error::validation(
                "error",
                format!("failed message {} has no error reason", self.id),
            ));
        }

        Ok(())
    }
}

/// A billing invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InvoiceRecord {
    /// Invoice number, e.g. `INV-2024-001`
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// Issue date as displayed
    pub date: String,

    /// Amount, already currency formatted
    pub amount: String,

    /// Settlement state
    pub status: InvoiceStatus,
}

/// A pre-configured automated message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Template number
    pub id: u32,
    /// Display name
    pub name: String,
    /// What the template is for
    pub description: String,
    /// Channel the template is written for
    pub channel: Channel,
    /// Publication state
    pub status: TemplateStatus,
    /// How many messages used this template
    pub usage_count: u64,
    /// Body with `{placeholder}` slots
    pub preview: String,
}

/// One entry in the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Feed position identifier
    pub id: u32,
    /// Call or message
    pub kind: ActivityKind,
    /// Outcome
    pub status: ActivityStatus,
    /// Customer phone number
    pub customer: String,
    /// Relative time label, e.g. `2 min ago`
    pub time: String,
    /// Channel label for messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Pre-formatted duration for calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// One category of the activity chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    /// Category label on the x axis, e.g. `2 PM`
    pub time: String,
    /// Calls in this slot
    pub calls: u32,
    /// Messages in this slot
    pub messages: u32,
}

/// Visual emphasis of a stat card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatVariant {
    /// Plain card
    #[default]
    Default,
    /// Brand-colored card
    Primary,
    /// Success-colored card
    Success,
}

/// A headline number on the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    /// Card title
    pub title: String,
    /// Pre-formatted value
    pub value: String,
    /// Percent change since yesterday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Visual emphasis
    #[serde(default)]
    pub variant: StatVariant,
}

/// Card on file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Card brand
    pub brand: String,
    /// Last four digits
    pub last4: String,
    /// Expiry as `MM/YYYY`
    pub expires: String,
}

/// The subscription plan and its current usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name
    pub name: String,
    /// Marketing blurb
    pub description: String,
    /// Price, already currency formatted
    pub price: String,
    /// Billing period suffix, e.g. `/month`
    pub period: String,
    /// Messages included per period
    pub messages_included: u64,
    /// Messages sent this period
    pub messages_used: u64,
    /// Phone numbers included
    pub phone_numbers: u32,
    /// Team seats included
    pub seats: u32,
    /// When usage resets, as displayed
    pub resets_on: String,
    /// Default payment method
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn message(status: MessageStatus) -> MessageRecord {
        MessageRecord {
            id: "MSG-100".to_string(),
            call_id: "CL-100".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
            template: "Survey Request".to_string(),
            channel: Channel::WhatsApp,
            status,
            sent_at: at("2024-01-15 10:00:00"),
            delivered_at: None,
            error: None,
        }
    }

    #[test]
    fn test_declared_values_parse_case_insensitively() {
        assert_eq!(CallStatus::parse_declared("Missed"), Some(CallStatus::Missed));
        assert_eq!(Channel::parse_declared("whatsapp"), Some(Channel::WhatsApp));
        assert_eq!(Channel::parse_declared(" sms "), Some(Channel::Sms));
        assert_eq!(MessageStatus::parse_declared("all-messages"), None);
        assert_eq!(InvoiceStatus::parse_declared(""), None);
    }

    #[test]
    fn test_unknown_values_are_kept_verbatim() {
        let status: MessageStatus = serde_json::from_str("\"queued\"").unwrap();
        assert_eq!(status, MessageStatus::Unknown("queued".to_string()));
        assert_eq!(status.as_str(), "queued");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"queued\"");
    }

    #[test]
    fn test_declared_values_serialize_as_labels() {
        assert_eq!(serde_json::to_string(&Channel::Sms).unwrap(), "\"SMS\"");
        assert_eq!(
            serde_json::to_string(&CallStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(TemplateStatus::Draft.to_string(), "draft");
    }

    #[test]
    fn test_declared_lists_every_variant() {
        assert_eq!(
            MessageStatus::declared(),
            vec![
                MessageStatus::Delivered,
                MessageStatus::Failed,
                MessageStatus::Pending
            ]
        );
        assert_eq!(InvoiceStatus::declared(), vec![InvoiceStatus::Paid]);
    }

    #[test]
    fn test_call_duration_label() {
        let call = CallRecord {
            id: "CL-100".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
            duration_seconds: 272,
            agent: "Sarah M.".to_string(),
            call_status: CallStatus::Completed,
            message_status: MessageStatus::Delivered,
            channel: Some(Channel::WhatsApp),
            timestamp: at("2024-01-15 14:32:00"),
        };
        assert_eq!(call.duration_label(), "4:32");
        assert!(call.validate().is_ok());
    }

    #[test]
    fn test_call_without_channel_deserializes() {
        let json = r#"{
            "id": "CL-004",
            "phone": "+1 (555) 567-8901",
            "duration_seconds": 65,
            "agent": "John D.",
            "call_status": "missed",
            "message_status": "pending",
            "timestamp": "2024-01-15T14:02:00"
        }"#;
        let call: CallRecord = serde_json::from_str(json).unwrap();
        assert!(call.channel.is_none());
        assert_eq!(call.call_status, CallStatus::Missed);
    }

    #[test]
    fn test_delivered_message_requires_delivery_time() {
        let mut msg = message(MessageStatus::Delivered);
        assert!(msg.check_delivery().is_err());

        msg.delivered_at = Some(at("2024-01-15 10:00:02"));
        assert!(msg.check_delivery().is_ok());
    }

    #[test]
    fn test_pending_message_rejects_delivery_time() {
        let mut msg = message(MessageStatus::Pending);
        assert!(msg.check_delivery().is_ok());

        msg.delivered_at = Some(at("2024-01-15 10:00:02"));
        let err = msg.check_delivery().unwrap_err();
        assert!(err.to_string().contains("delivered_at"));
    }

    #[test]
    fn test_failed_message_requires_reason() {
        let mut msg = message(MessageStatus::Failed);
        let err = msg.check_delivery().unwrap_err();
        assert!(err.to_string().contains("no error reason"));

        msg.error = Some("Invalid number format".to_string());
        assert!(msg.check_delivery().is_ok());
    }

    #[test]
    fn test_stat_variant_defaults() {
        let card: StatCard =
            serde_json::from_str(r#"{"title": "Failed Messages", "value": "9"}"#).unwrap();
        assert_eq!(card.variant, StatVariant::Default);
        assert!(card.change.is_none());
    }
}
