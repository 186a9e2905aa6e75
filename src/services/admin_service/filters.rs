use chrono::NaiveDate;

use crate::models::{Id, Role, Session, SessionStatus, User};

/// Dashboard filter over a fetched user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    /// Case-insensitive match on email, first or last name.
    pub search: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        [
            Some(user.email.as_str()),
            user.first_name.as_deref(),
            user.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| self.matches(u)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<SessionStatus>,
    pub psychologist_id: Option<Id>,
    pub client_id: Option<Id>,
    /// Inclusive.
    pub from: Option<NaiveDate>,
    /// Inclusive.
    pub to: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn matches(&self, session: &Session) -> bool {
        self.status.map_or(true, |s| session.status == s)
            && self
                .psychologist_id
                .as_ref()
                .map_or(true, |id| &session.psychologist_id == id)
            && self
                .client_id
                .as_ref()
                .map_or(true, |id| &session.client_id == id)
            && self.from.map_or(true, |d| session.scheduled_date >= d)
            && self.to.map_or(true, |d| session.scheduled_date <= d)
    }

    pub fn apply(&self, sessions: Vec<Session>) -> Vec<Session> {
        sessions.into_iter().filter(|s| self.matches(s)).collect()
    }
}
