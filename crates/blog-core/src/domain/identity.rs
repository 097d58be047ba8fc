use uuid::Uuid;

use super::account::{Account, Role};

/// The authenticated caller for a single request.
///
/// Built by the access resolver from a matched account and passed explicitly
/// into every service call that needs it. Never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    /// `None` means non-admin.
    pub role: Option<Role>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Ownership rule: the caller owns the resource, or is an admin.
    pub fn can_modify(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: Some(account.role),
        }
    }
}
