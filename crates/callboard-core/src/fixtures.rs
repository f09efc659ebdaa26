//! Built-in sample dataset served when no seed file is configured

use crate::store::DatasetSeed;
use crate::types::{
    ActivityEvent, ActivityKind, ActivityPoint, ActivityStatus, CallRecord, CallStatus, Channel,
    InvoiceRecord, InvoiceStatus, MessageRecord, MessageStatus, MessageTemplate, PaymentMethod,
    Plan, StatCard, StatVariant, TemplateStatus,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn at(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| Error::validation("timestamp", format!("{value:?}: {e}")))
}

#[allow(clippy::too_many_arguments)]
fn call(
    id: &str,
    phone: &str,
    duration_seconds: u32,
    agent: &str,
    call_status: CallStatus,
    message_status: MessageStatus,
    channel: Option<Channel>,
    timestamp: &str,
) -> Result<CallRecord> {
    Ok(CallRecord {
        id: id.to_string(),
        phone: phone.to_string(),
        duration_seconds,
        agent: agent.to_string(),
        call_status,
        message_status,
        channel,
        timestamp: at(timestamp)?,
    })
}

#[allow(clippy::too_many_arguments)]
fn message(
    id: &str,
    call_id: &str,
    phone: &str,
    template: &str,
    channel: Channel,
    status: MessageStatus,
    sent_at: &str,
    delivered_at: Option<&str>,
    error: Option<&str>,
) -> Result<MessageRecord> {
    Ok(MessageRecord {
        id: id.to_string(),
        call_id: call_id.to_string(),
        phone: phone.to_string(),
        template: template.to_string(),
        channel,
        status,
        sent_at: at(sent_at)?,
        delivered_at: delivered_at.map(at).transpose()?,
        error: error.map(ToString::to_string),
    })
}

fn invoice(id: &str, date: &str, amount: &str) -> InvoiceRecord {
    InvoiceRecord {
        id: id.to_string(),
        date: date.to_string(),
        amount: amount.to_string(),
        status: InvoiceStatus::Paid,
    }
}

fn template(
    id: u32,
    name: &str,
    description: &str,
    channel: Channel,
    status: TemplateStatus,
    usage_count: u64,
    preview: &str,
) -> MessageTemplate {
    MessageTemplate {
        id,
        name: name.to_string(),
        description: description.to_string(),
        channel,
        status,
        usage_count,
        preview: preview.to_string(),
    }
}

fn activity(
    id: u32,
    kind: ActivityKind,
    status: ActivityStatus,
    customer: &str,
    time: &str,
    detail: &str,
) -> ActivityEvent {
    let (channel, duration) = match kind {
        ActivityKind::Call => (None, Some(detail.to_string())),
        _ => (Some(detail.to_string()), None),
    };
    ActivityEvent {
        id,
        kind,
        status,
        customer: customer.to_string(),
        time: time.to_string(),
        channel,
        duration,
    }
}

fn point(time: &str, calls: u32, messages: u32) -> ActivityPoint {
    ActivityPoint {
        time: time.to_string(),
        calls,
        messages,
    }
}

fn stat(title: &str, value: &str, change: f64, variant: StatVariant) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: value.to_string(),
        change: Some(change),
        variant,
    }
}

/// The sample dataset
///
/// # Errors
///
/// Returns an error if a sample timestamp fails to parse.
pub fn sample_seed() -> Result<DatasetSeed> {
    use CallStatus::{Completed, Missed};
    use MessageStatus::{Delivered, Failed, Pending};

    let calls = vec![
        call("CL-001", "+1 (555) 234-5678", 272, "Sarah M.", Completed, Delivered, Some(Channel::WhatsApp), "2024-01-15 14:32:00")?,
        call("CL-002", "+1 (555) 345-6789", 135, "Mike R.", Completed, Delivered, Some(Channel::WhatsApp), "2024-01-15 14:28:00")?,
        call("CL-003", "+1 (555) 456-7890", 408, "Sarah M.", Completed, Failed, Some(Channel::Sms), "2024-01-15 14:15:00")?,
        call("CL-004", "+1 (555) 567-8901", 65, "John D.", Missed, Pending, None, "2024-01-15 14:02:00")?,
        call("CL-005", "+1 (555) 678-9012", 202, "Mike R.", Completed, Delivered, Some(Channel::WhatsApp), "2024-01-15 13:55:00")?,
        call("CL-006", "+1 (555) 789-0123", 310, "Sarah M.", Completed, Delivered, Some(Channel::Sms), "2024-01-15 13:42:00")?,
    ];

    let messages = vec![
        message("MSG-001", "CL-001", "+1 (555) 234-5678", "Appointment Confirmation", Channel::WhatsApp, Delivered, "2024-01-15 14:33:00", Some("2024-01-15 14:33:02"), None)?,
        message("MSG-002", "CL-002", "+1 (555) 345-6789", "Follow-up Reminder", Channel::WhatsApp, Delivered, "2024-01-15 14:29:00", Some("2024-01-15 14:29:03"), None)?,
        message("MSG-003", "CL-003", "+1 (555) 456-7890", "Appointment Confirmation", Channel::Sms, Failed, "2024-01-15 14:16:00", None, Some("Invalid number format"))?,
        message("MSG-004", "CL-005", "+1 (555) 678-9012", "Survey Request", Channel::WhatsApp, Delivered, "2024-01-15 13:56:00", Some("2024-01-15 13:56:01"), None)?,
        message("MSG-005", "CL-006", "+1 (555) 789-0123", "Payment Reminder", Channel::Sms, Delivered, "2024-01-15 13:43:00", Some("2024-01-15 13:43:05"), None)?,
        message("MSG-006", "CL-007", "+1 (555) 890-1234", "Appointment Confirmation", Channel::WhatsApp, Pending, "2024-01-15 13:35:00", None, None)?,
    ];

    let invoices = vec![
        invoice("INV-2024-001", "Jan 1, 2024", "$149.00"),
        invoice("INV-2023-012", "Dec 1, 2023", "$149.00"),
        invoice("INV-2023-011", "Nov 1, 2023", "$99.00"),
        invoice("INV-2023-010", "Oct 1, 2023", "$99.00"),
    ];

    let templates = vec![
        template(
            1,
            "Appointment Confirmation",
            "Confirms the appointment details after a call",
            Channel::WhatsApp,
            TemplateStatus::Active,
            1247,
            "Hi {name}! Your appointment is confirmed for {date} at {time}. Reply YES to confirm or call us at {phone} to reschedule.",
        ),
        template(
            2,
            "Follow-up Reminder",
            "Sends a reminder 24 hours before the appointment",
            Channel::WhatsApp,
            TemplateStatus::Active,
            892,
            "Hi {name}, just a reminder about your appointment tomorrow at {time}. See you then! Reply CANCEL if you need to reschedule.",
        ),
        template(
            3,
            "Survey Request",
            "Asks for feedback after service completion",
            Channel::WhatsApp,
            TemplateStatus::Active,
            654,
            "Thank you for choosing us, {name}! How was your experience? Reply with a rating from 1-5 stars.",
        ),
        template(
            4,
            "Payment Reminder",
            "Gentle reminder for pending payments",
            Channel::Sms,
            TemplateStatus::Active,
            423,
            "Hi {name}, you have an outstanding balance of {amount}. Pay online at {link} or call us at {phone}.",
        ),
        template(
            5,
            "Service Complete",
            "Notification when a service has been completed",
            Channel::WhatsApp,
            TemplateStatus::Draft,
            0,
            "Great news {name}! Your {service} is complete. Pick up anytime during business hours. Thank you!",
        ),
    ];

    let activity = vec![
        activity(1, ActivityKind::Message, ActivityStatus::Delivered, "+1 (555) 234-5678", "2 min ago", "WhatsApp"),
        activity(2, ActivityKind::Call, ActivityStatus::Completed, "+1 (555) 345-6789", "5 min ago", "4:32"),
        activity(3, ActivityKind::Message, ActivityStatus::Failed, "+1 (555) 456-7890", "8 min ago", "SMS (fallback)"),
        activity(4, ActivityKind::Call, ActivityStatus::Completed, "+1 (555) 567-8901", "12 min ago", "2:15"),
        activity(5, ActivityKind::Message, ActivityStatus::Delivered, "+1 (555) 678-9012", "15 min ago", "WhatsApp"),
    ];

    let hourly_activity = vec![
        point("6 AM", 4, 3),
        point("8 AM", 12, 10),
        point("10 AM", 28, 24),
        point("12 PM", 35, 30),
        point("2 PM", 42, 38),
        point("4 PM", 38, 35),
        point("6 PM", 22, 20),
        point("8 PM", 8, 7),
    ];

    let stat_cards = vec![
        stat("Calls Today", "189", 12.0, StatVariant::Primary),
        stat("Messages Sent", "156", 8.0, StatVariant::Success),
        stat("Delivery Rate", "94.2%", 2.1, StatVariant::Default),
        stat("Failed Messages", "9", -15.0, StatVariant::Default),
    ];

    let plan = Plan {
        name: "Growth Plan".to_string(),
        description: "Perfect for growing SMEs with moderate call volumes".to_string(),
        price: "$149".to_string(),
        period: "/month".to_string(),
        messages_included: 2000,
        messages_used: 1247,
        phone_numbers: 3,
        seats: 5,
        resets_on: "February 1, 2024".to_string(),
        payment_method: PaymentMethod {
            brand: "Visa".to_string(),
            last4: "4242".to_string(),
            expires: "12/2025".to_string(),
        },
    };

    Ok(DatasetSeed {
        calls,
        messages,
        invoices,
        templates,
        activity,
        hourly_activity,
        stat_cards,
        plan,
    })
}
