//! The acting user, passed explicitly to anything that needs user scope.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    /// Name shown to other users (RSVPs, hosted nights)
    pub display_name: Option<String>,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        SessionContext {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, falling back to the user id.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }
}
