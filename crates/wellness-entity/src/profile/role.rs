//! Platform-wide profile role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform role of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    /// Platform administrator.
    Admin,
    /// HR manager of an organization.
    Manager,
    /// Employee taking trails and answering forms.
    Employee,
}

impl ProfileRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfileRole {
    type Err = wellness_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(wellness_core::AppError::validation(format!(
                "Invalid profile role: '{s}'. Expected one of: admin, manager, employee"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Manager".parse::<ProfileRole>().unwrap(), ProfileRole::Manager);
        assert!("root".parse::<ProfileRole>().is_err());
    }
}
