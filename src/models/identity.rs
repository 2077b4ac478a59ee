use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in user of the client.
///
/// The identity is returned by the auth API on login and on every refresh
/// probe, and is the only user data the client persists locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

/// The user's role, which decides how route guards treat them.
///
/// - `Staff`: Platform operators. Never business-scoped; routed to the staff
///   area instead of onboarding-gated content.
/// - `Accountant`: Marketplace accountants. Allowed through business-scoped
///   routes without a business profile of their own.
/// - `Owner`: Standard small-business owners. Must complete onboarding
///   before reaching business-scoped routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,
    Accountant,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Accountant => "accountant",
            Self::Owner => "owner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "staff" => Some(Self::Staff),
            "accountant" => Some(Self::Accountant),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }
}
