use contracts::system::auth::UserInfo;

/// Caller identity handed to views explicitly instead of being read from
/// ambient context inside the logic that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_admin: true,
        }
    }

    pub fn customer(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_admin: false,
        }
    }
}

impl From<&UserInfo> for Identity {
    fn from(user: &UserInfo) -> Self {
        Self {
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}
