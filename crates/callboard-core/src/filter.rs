//! Free-text search and categorical filtering over record sets
//!
//! A [`ViewFilter`] pairs a [`SearchQuery`] with a page-specific [`Facets`]
//! selection. Applying it to a slice of records yields the matching records in
//! their original order. Facet values that are not declared for the field
//! (including UI sentinels such as `all` or `all-channels`) clear the
//! restriction instead of failing.

use crate::types::{
    CallRecord, CallStatus, Channel, Declared, InvoiceRecord, InvoiceStatus, MessageRecord,
    MessageStatus, MessageTemplate, TemplateStatus,
};
use crate::utils::digits_only;
use serde::Serialize;
use tracing::debug;

/// Characters that may appear in a phone-number style query besides digits
const PHONE_PUNCTUATION: &[char] = &[' ', '+', '-', '(', ')', '.'];

/// Records that can be matched by a free-text query
pub trait Searchable {
    /// Fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Phone number to compare digit-for-digit, if the record has one
    fn phone_number(&self) -> Option<&str> {
        None
    }
}

impl Searchable for CallRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.phone.as_str(), self.id.as_str()]
    }

    fn phone_number(&self) -> Option<&str> {
        Some(self.phone.as_str())
    }
}

impl Searchable for MessageRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.phone.as_str(), self.id.as_str()]
    }

    fn phone_number(&self) -> Option<&str> {
        Some(self.phone.as_str())
    }
}

impl Searchable for InvoiceRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str()]
    }
}

impl Searchable for MessageTemplate {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// A normalized free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
    digits: Option<String>,
}

impl SearchQuery {
    /// Normalize user input into a query
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();

        let looks_like_phone = needle.chars().any(|c| c.is_ascii_digit())
            && needle
                .chars()
                .all(|c| c.is_ascii_digit() || PHONE_PUNCTUATION.contains(&c));
        let digits = looks_like_phone.then(|| digits_only(&needle));

        Self {
            raw,
            needle,
            digits,
        }
    }

    /// The query as typed
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the query places no restriction (empty or whitespace only)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `record` satisfies the text predicate
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        if self.is_empty() {
            return true;
        }

        if record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
        {
            return true;
        }

        match (&self.digits, record.phone_number()) {
            (Some(digits), Some(phone)) => digits_only(phone).contains(digits.as_str()),
            _ => false,
        }
    }
}

/// Resolve a raw selector value to a restriction; `None` means "all"
#[must_use]
pub fn selection<T: Declared>(value: &str) -> Option<T> {
    T::parse_declared(value)
}

/// Categorical selections for one page
pub trait Facets {
    /// Record type the selections apply to
    type Record;

    /// Whether `record` passes every active selection
    fn admits(&self, record: &Self::Record) -> bool;

    /// Set the selection for `facet` from a raw value.
    ///
    /// Returns `false` when the facet name is not known for this page. An
    /// undeclared value clears the selection.
    fn select(&mut self, facet: &str, value: &str) -> bool;

    /// Currently active selections as `(facet, value)` pairs
    fn active(&self) -> Vec<(&'static str, String)>;
}

fn admits_opt<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

fn push_active<T: std::fmt::Display>(
    out: &mut Vec<(&'static str, String)>,
    facet: &'static str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        out.push((facet, value.to_string()));
    }
}

/// Selections on the call-log page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFacets {
    /// Restrict by call outcome
    pub call_status: Option<CallStatus>,
    /// Restrict by follow-up message state
    pub message_status: Option<MessageStatus>,
    /// Restrict by follow-up channel
    pub channel: Option<Channel>,
}

impl Facets for CallFacets {
    type Record = CallRecord;

    fn admits(&self, record: &CallRecord) -> bool {
        admits_opt(self.call_status.as_ref(), &record.call_status)
            && admits_opt(self.message_status.as_ref(), &record.message_status)
            && self
                .channel
                .as_ref()
                .is_none_or(|wanted| record.channel.as_ref() == Some(wanted))
    }

    fn select(&mut self, facet: &str, value: &str) -> bool {
        match facet {
            "status" | "call_status" => self.call_status = selection(value),
            "message_status" => self.message_status = selection(value),
            "channel" => self.channel = selection(value),
            _ => {
                debug!(facet, "ignoring unknown call facet");
                return false;
            }
        }
        true
    }

    fn active(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_active(&mut out, "status", self.call_status.as_ref());
        push_active(&mut out, "message_status", self.message_status.as_ref());
        push_active(&mut out, "channel", self.channel.as_ref());
        out
    }
}

/// Selections on the message-log page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFacets {
    /// Restrict by delivery state
    pub status: Option<MessageStatus>,
    /// Restrict by channel
    pub channel: Option<Channel>,
}

impl Facets for MessageFacets {
    type Record = MessageRecord;

    fn admits(&self, record: &MessageRecord) -> bool {
        admits_opt(self.status.as_ref(), &record.status)
            && admits_opt(self.channel.as_ref(), &record.channel)
    }

    fn select(&mut self, facet: &str, value: &str) -> bool {
        match facet {
            "status" => self.status = selection(value),
            "channel" => self.channel = selection(value),
            _ => {
                debug!(facet, "ignoring unknown message facet");
                return false;
            }
        }
        true
    }

    fn active(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_active(&mut out, "status", self.status.as_ref());
        push_active(&mut out, "channel", self.channel.as_ref());
        out
    }
}

/// Selections on the invoice table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFacets {
    /// Restrict by settlement state
    pub status: Option<InvoiceStatus>,
}

impl Facets for InvoiceFacets {
    type Record = InvoiceRecord;

    fn admits(&self, record: &InvoiceRecord) -> bool {
        admits_opt(self.status.as_ref(), &record.status)
    }

    fn select(&mut self, facet: &str, value: &str) -> bool {
        if facet == "status" {
            self.status = selection(value);
            true
        } else {
            debug!(facet, "ignoring unknown invoice facet");
            false
        }
    }

    fn active(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_active(&mut out, "status", self.status.as_ref());
        out
    }
}

/// Selections on the template gallery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFacets {
    /// Restrict by publication state
    pub status: Option<TemplateStatus>,
    /// Restrict by channel
    pub channel: Option<Channel>,
}

impl Facets for TemplateFacets {
    type Record = MessageTemplate;

    fn admits(&self, record: &MessageTemplate) -> bool {
        admits_opt(self.status.as_ref(), &record.status)
            && admits_opt(self.channel.as_ref(), &record.channel)
    }

    fn select(&mut self, facet: &str, value: &str) -> bool {
        match facet {
            "status" => self.status = selection(value),
            "channel" => self.channel = selection(value),
            _ => {
                debug!(facet, "ignoring unknown template facet");
                return false;
            }
        }
        true
    }

    fn active(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_active(&mut out, "status", self.status.as_ref());
        push_active(&mut out, "channel", self.channel.as_ref());
        out
    }
}

/// Transient search and filter state of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter<F> {
    query: SearchQuery,
    facets: F,
}

impl<F: Facets> ViewFilter<F> {
    /// Build a filter from a query and facet selections
    pub fn new(query: impl Into<String>, facets: F) -> Self {
        Self {
            query: SearchQuery::new(query),
            facets,
        }
    }

    /// Replace the free-text query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
    }

    /// Set one facet from a raw selector value
    pub fn select(&mut self, facet: &str, value: &str) -> bool {
        self.facets.select(facet, value)
    }

    /// Current query
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Current facet selections
    pub const fn facets(&self) -> &F {
        &self.facets
    }

    /// Whether `record` passes the query and every active facet
    pub fn matches(&self, record: &F::Record) -> bool
    where
        F::Record: Searchable,
    {
        self.query.matches(record) && self.facets.admits(record)
    }

    /// The matching records, in their original order
    pub fn apply<'a>(&self, records: &'a [F::Record]) -> Vec<&'a F::Record>
    where
        F::Record: Searchable,
    {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Summary of the active restrictions
    pub fn describe(&self) -> AppliedFilters {
        AppliedFilters {
            query: (!self.query.is_empty()).then(|| self.query.as_str().trim().to_string()),
            facets: self
                .facets
                .active()
                .into_iter()
                .map(|(facet, value)| AppliedFacet { facet, value })
                .collect(),
        }
    }
}

/// Restrictions that were in effect for a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    /// Trimmed free-text query, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Active facet selections
    pub facets: Vec<AppliedFacet>,
}

/// One active facet selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFacet {
    /// Facet name
    pub facet: &'static str,
    /// Selected value
    pub value: String,
}
