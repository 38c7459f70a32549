use std::sync::Arc;

use base64::Engine;
use dashmap::DashMap;
use rand_core::{OsRng, RngCore};
use time::{Duration, OffsetDateTime};

use crate::domain::Account;

#[derive(Debug)]
pub enum SessionError {
    NotExists,
    Expired,
}

struct Entry {
    account: Account,
    created_at: OffsetDateTime,
}

/// Server-side session map. The cookie only ever carries the opaque id.
#[derive(Clone)]
pub struct Sessions {
    inner: Arc<DashMap<String, Entry>>,
    ttl: Duration,
}

pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Sessions {
    pub fn new(ttl_hours: u64) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    pub fn new_session(&self, account: Account) -> SessionId {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD as Base64;

        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);

        let session_id = Base64.encode(bytes);
        self.inner.insert(
            session_id.clone(),
            Entry {
                account,
                created_at: OffsetDateTime::now_utc(),
            },
        );

        SessionId(session_id)
    }

    /// Resolves a session id to its account, evicting it when past the TTL.
    pub fn account(&self, session_id: &str) -> Result<Account, SessionError> {
        let expired = {
            let Some(entry) = self.inner.get(session_id) else {
                return Err(SessionError::NotExists);
            };

            if OffsetDateTime::now_utc() - entry.created_at >= self.ttl {
                true
            } else {
                return Ok(entry.account.clone());
            }
        };

        if expired {
            self.inner.remove(session_id);
        }
        Err(SessionError::Expired)
    }

    pub fn remove(&self, session_id: &str) {
        self.inner.remove(session_id);
    }
}
