//! Property mapper: the user/target alias on [`ResourceSpec`].
//!
//! The account an entry is scheduled for (`user`) and the account whose
//! file it is written to (`target`) are stored separately but must stay
//! consistent. Setting the user writes both; reading either falls back
//! to the other when the primary is unset.

use crate::matcher::ResourceSpec;

impl ResourceSpec {
    /// Set the scheduling account. Also writes the target so matching
    /// and scheduling stay on the same account.
    pub fn set_user(&mut self, user: impl Into<String>) {
        let user = user.into();
        self.target = Some(user.clone());
        self.user = Some(user);
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().or(self.target.as_deref())
    }

    /// Set only the target file's account, leaving the user as-is.
    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().or(self.user.as_deref())
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.set_user(user);
        self
    }
}
