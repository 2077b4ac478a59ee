use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tenant record for the signed-in owner's business.
///
/// Created by the onboarding flow (outside this crate) and absent until that
/// flow completes; the onboarding guard redirects owners without one.
/// Persisted locally so a returning user lands in their business without a
/// network round-trip, and cleared on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    pub name: String,
    pub kind: BusinessKind,
    /// ISO 4217 currency code used for invoices and reports.
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// What the business sells, which decides inventory vs. service flows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BusinessKind {
    Goods,
    Service,
}

impl BusinessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Service => "service",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "goods" => Some(Self::Goods),
            "service" => Some(Self::Service),
            _ => None,
        }
    }
}
