use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Viewer,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Viewer, UserRole::Admin, UserRole::SuperAdmin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Viewer => "viewer",
            Admin => "admin",
            SuperAdmin => "super_admin",
        }
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }

    /// Case-insensitive lookup; `None` for codes outside the known set
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
