use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a product
///
/// `Inactive` is only reached through soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Draft,
    Inactive,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Active,
        ProductStatus::Draft,
        ProductStatus::Inactive,
    ];

    /// States a product may be created in
    pub const CREATABLE: [ProductStatus; 2] = [ProductStatus::Active, ProductStatus::Draft];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use ProductStatus::*;
        match self {
            Active => "active",
            Draft => "draft",
            Inactive => "inactive",
        }
    }

    /// Exact lookup over every stored state
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Exact lookup restricted to [`Self::CREATABLE`]
    pub fn for_creation(code: &str) -> Option<Self> {
        Self::CREATABLE
            .into_iter()
            .find(|status| status.code() == code)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
