//! Immutable record sets backing each dashboard page

use crate::config::DataConfig;
use crate::metrics::UsageMeter;
use crate::types::{
    ActivityEvent, ActivityPoint, CallRecord, InvoiceRecord, MessageRecord, MessageTemplate, Plan,
    StatCard,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};
use validator::Validate;

/// A record kept in a [`RecordStore`]
pub trait Record {
    /// Unique identifier within the set
    fn id(&self) -> &str;

    /// Validate the record's own fields
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first problem found.
    fn check(&self) -> Result<()>;
}

impl Record for CallRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<()> {
        Ok(self.validate()?)
    }
}

impl Record for MessageRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<()> {
        self.validate()?;
        self.check_delivery()
    }
}

impl Record for InvoiceRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<()> {
        Ok(self.validate()?)
    }
}

/// An ordered, validated, read-only record set
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    /// Validate `records` and freeze them in their given order
    ///
    /// # Errors
    ///
    /// Returns a validation error if any record is invalid or two records
    /// share an id.
    pub fn new(records: Vec<R>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.check()?;
            if !seen.insert(record.id()) {
                return Err(Error::validation(
                    "id",
                    format!("duplicate id {}", record.id()),
                ));
            }
        }

        Ok(Self { records })
    }

    /// All records, in load order
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Look a record up by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A call carries a channel exactly when some message follows it up
fn check_follow_up_channels(
    calls: &RecordStore<CallRecord>,
    messages: &RecordStore<MessageRecord>,
) -> Result<()> {
    let followed_up: HashSet<&str> = messages
        .records()
        .iter()
        .map(|message| message.call_id.as_str())
        .collect();

    for call in calls.records() {
        match (&call.channel, followed_up.contains(call.id.as_str())) {
            (Some(channel), false) => {
                return Err(Error::validation(
                    "channel",
                    format!("call {} has channel {channel} but no message was sent", call.id),
                ));
            }
            (None, true) => {
                return Err(Error::validation(
                    "channel",
                    format!("call {} has a follow-up message but no channel", call.id),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Serialized form of a full dataset, as read from a seed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSeed {
    /// Call log
    #[serde(default)]
    pub calls: Vec<CallRecord>,
    /// Message log
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
    /// Invoice history
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    /// Message templates
    #[serde(default)]
    pub templates: Vec<MessageTemplate>,
    /// Recent activity feed
    #[serde(default)]
    pub activity: Vec<ActivityEvent>,
    /// Activity chart points
    #[serde(default)]
    pub hourly_activity: Vec<ActivityPoint>,
    /// Overview stat cards
    #[serde(default)]
    pub stat_cards: Vec<StatCard>,
    /// Current plan
    pub plan: Plan,
}

/// Every record set the dashboard serves
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Call log
    pub calls: RecordStore<CallRecord>,
    /// Message log
    pub messages: RecordStore<MessageRecord>,
    /// Invoice history
    pub invoices: RecordStore<InvoiceRecord>,
    /// Message templates
    pub templates: Vec<MessageTemplate>,
    /// Recent activity feed
    pub activity: Vec<ActivityEvent>,
    /// Activity chart points
    pub hourly_activity: Vec<ActivityPoint>,
    /// Overview stat cards
    pub stat_cards: Vec<StatCard>,
    /// Current plan
    pub plan: Plan,
}

impl Dataset {
    /// Validate a seed and build the record stores
    ///
    /// # Errors
    ///
    /// Returns an error if a record set fails validation, a call's channel
    /// disagrees with whether a message followed it up, or the plan has a
    /// zero message limit.
    pub fn from_seed(seed: DatasetSeed) -> Result<Self> {
        let calls = RecordStore::new(seed.calls)?;
        let messages = RecordStore::new(seed.messages)?;
        let invoices = RecordStore::new(seed.invoices)?;

        for message in messages.records() {
            if calls.get(&message.call_id).is_none() {
                warn!(
                    message_id = %message.id,
                    call_id = %message.call_id,
                    "message references a call that is not in the call log"
                );
            }
        }
        check_follow_up_channels(&calls, &messages)?;

        UsageMeter::new(seed.plan.messages_used, seed.plan.messages_included)?;

        debug!(
            calls = calls.len(),
            messages = messages.len(),
            invoices = invoices.len(),
            templates = seed.templates.len(),
            "dataset validated"
        );

        Ok(Self {
            calls,
            messages,
            invoices,
            templates: seed.templates,
            activity: seed.activity,
            hourly_activity: seed.hourly_activity,
            stat_cards: seed.stat_cards,
            plan: seed.plan,
        })
    }

    /// The built-in sample dataset
    ///
    /// # Errors
    ///
    /// Returns an error if the sample data fails validation.
    pub fn sample() -> Result<Self> {
        Self::from_seed(crate::fixtures::sample_seed()?)
    }

    /// Read a JSON seed file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed: DatasetSeed = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    /// Load the configured seed file, or the sample data when none is set
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded or validated.
    pub fn load(config: &DataConfig) -> Result<Self> {
        match &config.seed_file {
            Some(path) => {
                info!(path = %path.display(), "loading dataset from seed file");
                Self::from_path(path)
            }
            None => {
                info!("using built-in sample dataset");
                Self::sample()
            }
        }
    }
}
