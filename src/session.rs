//! Transient login state for the single active session.

use tracing::info;

use crate::auth::PublicUser;

#[derive(Debug, Default)]
pub struct Session {
    current: Option<PublicUser>,
}

impl Session {
    pub fn login(&mut self, user: PublicUser) {
        info!(username = %user.username, "session started");
        self.current = Some(user);
    }

    pub fn logout(&mut self) -> Option<PublicUser> {
        let previous = self.current.take();
        if let Some(user) = &previous {
            info!(username = %user.username, "session ended");
        }
        previous
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.current.as_ref()
    }

    /// Payments are keyed by username.
    pub fn user_id(&self) -> Option<&str> {
        self.current.as_ref().map(|u| u.username.as_str())
    }
}
