//! Row and input types shared by the repository trait and its backends

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================================
// Role
// ============================================================================

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Climber,
    Belayer,
    Admin,
}

impl Role {
    /// Every member, in declaration order
    pub const ALL: [Role; 3] = [Role::Climber, Role::Belayer, Role::Admin];

    /// Wire names, used by the role filter whitelist
    pub const NAMES: &'static [&'static str] = &["CLIMBER", "BELAYER", "ADMIN"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Climber => "CLIMBER",
            Role::Belayer => "BELAYER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse an exact, upper-case role name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}

// ============================================================================
// Rows
// ============================================================================

/// User row from database
///
/// The password is stored verbatim and must never be serialised to clients.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Climber profile row from database
#[derive(Debug, Clone)]
pub struct ClimberProfileRow {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
    pub location: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Belayer profile row from database
#[derive(Debug, Clone)]
pub struct BelayerProfileRow {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub certified_lead: bool,
    pub certified_top_rope: bool,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// User together with both optional profiles
#[derive(Debug, Clone)]
pub struct UserWithProfiles {
    pub user: UserRow,
    pub climber_profile: Option<ClimberProfileRow>,
    pub belayer_profile: Option<BelayerProfileRow>,
}

/// Climber profile together with its owning user
#[derive(Debug, Clone)]
pub struct ClimberWithUser {
    pub profile: ClimberProfileRow,
    pub user: UserRow,
}

/// Belayer profile together with its owning user
#[derive(Debug, Clone)]
pub struct BelayerWithUser {
    pub profile: BelayerProfileRow,
    pub user: UserRow,
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial user update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub climber_profile: Option<ClimberProfileChanges>,
    pub belayer_profile: Option<BelayerProfileChanges>,
}

#[derive(Debug, Clone, Default)]
pub struct NewClimberProfile {
    pub user_id: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
    pub location: Option<String>,
}

/// Partial climber profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ClimberProfileChanges {
    pub bio: Option<String>,
    pub preferences: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBelayerProfile {
    pub user_id: String,
    pub bio: Option<String>,
    pub certified_lead: bool,
    pub certified_top_rope: bool,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub availability: Option<String>,
}

/// Partial belayer profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BelayerProfileChanges {
    pub bio: Option<String>,
    pub certified_lead: Option<bool>,
    pub certified_top_rope: Option<bool>,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub availability: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_exact_only() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("CLIMBER"), Some(Role::Climber));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(" BELAYER"), None);
        assert!("bogus".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_names_match_members() {
        let names: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        assert_eq!(names, Role::NAMES);
    }

    #[test]
    fn test_role_serde_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Belayer).unwrap(), "\"BELAYER\"");
        let role: Role = serde_json::from_str("\"CLIMBER\"").unwrap();
        assert_eq!(role, Role::Climber);
        assert!(serde_json::from_str::<Role>("\"climber\"").is_err());
    }
}
