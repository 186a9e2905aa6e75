use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Id, TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Booked,
    Rescheduled,
    RescheduleRequested,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 6] = [
        SessionStatus::Booked,
        SessionStatus::Rescheduled,
        SessionStatus::RescheduleRequested,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
        SessionStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Booked => "booked",
            SessionStatus::Rescheduled => "rescheduled",
            SessionStatus::RescheduleRequested => "reschedule_requested",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::NoShow
        )
    }

    /// Statuses a session may reasonably move to next.
    ///
    /// Advisory only: the update endpoints accept any status and the backend
    /// is the one that rejects illegal moves.
    pub fn allowed_transitions(&self) -> &'static [SessionStatus] {
        use SessionStatus::*;
        match self {
            Booked => &[Rescheduled, RescheduleRequested, Cancelled, Completed, NoShow],
            RescheduleRequested => &[Rescheduled, Booked, Cancelled],
            Rescheduled => &[Booked, Cancelled, Completed, NoShow],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown session status: {}", s))
    }
}

/// A scheduled therapy appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Id,
    pub client_id: Id,
    pub psychologist_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<Id>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: TimeSlot,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_time: Option<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychologist_name: Option<String>,
}

impl Session {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.scheduled_date.and_time(self.scheduled_time.time())
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        !self.status.is_terminal() && self.starts_at() > now
    }

    /// Proposed new slot, present while a reschedule request is pending.
    pub fn requested_slot(&self) -> Option<(NaiveDate, TimeSlot)> {
        match (self.requested_date, self.requested_time) {
            (Some(date), Some(time)) => Some((date, time)),
            _ => None,
        }
    }
}

/// Body of `POST /clients/sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub psychologist_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<Id>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

/// Partial update sent by the generic session update call. Unset fields are
/// left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl SessionUpdate {
    pub fn status(status: SessionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Body of a client's reschedule request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub requested_date: NaiveDate,
    pub requested_time: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
