//! Per-call cache options and the portal's per-route revalidation policies

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tag carried by every cached event listing or event detail
pub const TAG_EVENTS: &str = "events";
/// Tag carried by every cached attendance read
pub const TAG_ATTENDANCE: &str = "attendance";
/// Tag carried by every cached order read
pub const TAG_ORDERS: &str = "orders";
/// Tag carried by every cached admin report
pub const TAG_REPORTS: &str = "reports";

/// Tag shared by everything derived from one event
pub fn event_tag(event_id: &str) -> String {
    format!("event:{}", event_id)
}

/// Tag shared by everything derived from one user
pub fn user_tag(user_id: &str) -> String {
    format!("user:{}", user_id)
}

/// Options for a single get-or-compute call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum age of a usable entry; `None` uses the cache default
    pub ttl: Option<Duration>,

    /// Tags attached to the entry written on a miss
    pub tags: Vec<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// How long each portal read may be served from cache and which groups it
/// belongs to. Writes invalidate by the same tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevalidationPolicy {
    /// Public event listing
    EventList,

    /// A single event page
    Event { event_id: String },

    /// Live attendance counts for an event (check-in screen)
    Attendance { event_id: String },

    /// A user's registrations and orders
    UserOrders { user_id: String },

    /// Admin reporting dashboards
    AdminReport,

    /// Anything else
    Custom { ttl: Duration, tags: Vec<String> },
}

impl RevalidationPolicy {
    pub fn ttl(&self) -> Duration {
        match self {
            RevalidationPolicy::EventList => Duration::from_secs(300),
            RevalidationPolicy::Event { .. } => Duration::from_secs(60),
            RevalidationPolicy::Attendance { .. } => Duration::from_secs(10),
            RevalidationPolicy::UserOrders { .. } => Duration::from_secs(30),
            RevalidationPolicy::AdminReport => Duration::from_secs(120),
            RevalidationPolicy::Custom { ttl, .. } => *ttl,
        }
    }

    pub fn tags(&self) -> Vec<String> {
        match self {
            RevalidationPolicy::EventList => vec![TAG_EVENTS.to_string()],
            RevalidationPolicy::Event { event_id } => {
                vec![TAG_EVENTS.to_string(), event_tag(event_id)]
            }
            RevalidationPolicy::Attendance { event_id } => {
                vec![TAG_ATTENDANCE.to_string(), event_tag(event_id)]
            }
            RevalidationPolicy::UserOrders { user_id } => {
                vec![TAG_ORDERS.to_string(), user_tag(user_id)]
            }
            RevalidationPolicy::AdminReport => vec![TAG_REPORTS.to_string()],
            RevalidationPolicy::Custom { tags, .. } => tags.clone(),
        }
    }

    pub fn options(&self) -> QueryOptions {
        QueryOptions::new().ttl(self.ttl()).tags(self.tags())
    }
}
