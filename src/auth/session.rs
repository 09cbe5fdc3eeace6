//! Process-held session records.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

/// The signed-in user, as shown in every page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
struct SessionRecord {
    user: SessionUser,
    expires_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a session for `user` and return its id.
    pub fn create(&self, user: SessionUser) -> Uuid {
        self.create_at(user, OffsetDateTime::now_utc())
    }

    fn create_at(&self, user: SessionUser, now: OffsetDateTime) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.retain(|_, record| record.expires_at > now);
        sessions.insert(
            id,
            SessionRecord {
                user,
                expires_at: now + self.ttl,
            },
        );
        debug!(session_id = %id, live = sessions.len(), "session created");
        id
    }

    /// Look up a live session. Expired records are dropped on sight.
    pub fn get(&self, id: &Uuid) -> Option<SessionUser> {
        self.get_at(id, OffsetDateTime::now_utc())
    }

    fn get_at(&self, id: &Uuid, now: OffsetDateTime) -> Option<SessionUser> {
        let record = {
            let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
            sessions.get(id).cloned()
        }?;
        if record.expires_at <= now {
            self.destroy(id);
            return None;
        }
        Some(record.user)
    }

    pub fn destroy(&self, id: &Uuid) {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
        if removed.is_some() {
            debug!(session_id = %id, "session destroyed");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
