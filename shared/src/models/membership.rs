//! Membership Tier Models

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership tier (会员等级), ordered from lowest to highest rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl MembershipTier {
    /// All tiers in rank order
    pub const ALL: [MembershipTier; 5] = [
        MembershipTier::Bronze,
        MembershipTier::Silver,
        MembershipTier::Gold,
        MembershipTier::Platinum,
        MembershipTier::Diamond,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
        }
    }

    /// Parse a stored tier value, degrading to `Bronze` for anything unknown
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %value, "Unknown membership tier, using bronze");
            Self::Bronze
        })
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict [`FromStr`] parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown membership tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for MembershipTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            "diamond" => Ok(Self::Diamond),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for MembershipTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// One row of the tier table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDefinition {
    pub tier: MembershipTier,
    pub min_visits: i64,
    pub min_spending: i64,
    /// Discount applied to visits (10 = 10%)
    pub discount_percentage: u32,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Requirements between a tier and the one above it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTierInfo {
    /// `None` when already at the top tier
    pub next_tier: Option<MembershipTier>,
    /// Next tier's `min_visits` minus the current tier's
    pub visits_needed: i64,
    /// Next tier's `min_spending` minus the current tier's
    pub spending_needed: i64,
}

/// Progress toward the next tier, each axis in percent (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProgress {
    pub visit_progress: f64,
    pub spending_progress: f64,
    /// Slower of the two axes
    pub overall_progress: f64,
    pub is_max_tier: bool,
}

/// Result of re-evaluating a member's cached tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCheck {
    pub should_upgrade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier: Option<MembershipTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i64>,
}

impl UpgradeCheck {
    pub fn unchanged() -> Self {
        Self {
            should_upgrade: false,
            new_tier: None,
            points_earned: None,
        }
    }
}
