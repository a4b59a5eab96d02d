use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The role a page declares, selecting which initializer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRole {
    Landing,
    Shop,
    Admin,
}

impl PageRole {
    /// Whether the role reads the persisted cart on start-up.
    #[must_use]
    pub fn loads_cart(self) -> bool {
        matches!(self, PageRole::Shop)
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRole::Landing => write!(f, "landing"),
            PageRole::Shop => write!(f, "shop"),
            PageRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for PageRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landing" => Ok(PageRole::Landing),
            "shop" => Ok(PageRole::Shop),
            "admin" => Ok(PageRole::Admin),
            other => Err(CoreError::UnknownPageRole(other.to_string())),
        }
    }
}
