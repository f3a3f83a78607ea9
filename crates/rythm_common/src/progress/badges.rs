//! Badge records and the redemption milestones that unlock them.

use serde::{Deserialize, Serialize};

pub const REBORN_MIND: &str = "reborn-mind";
pub const CHARACTER_GROWTH: &str = "character-growth";

/// An unlockable achievement. `id` is the identity; everything else is display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Epoch ms, stamped by the store when the badge is added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<i64>,
}

impl Badge {
    pub fn new(id: &str, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked_at: None,
        }
    }
}

/// Redemption point total that unlocks a badge
#[derive(Debug, Clone, Copy)]
pub struct RedemptionMilestone {
    pub threshold: i64,
    pub badge_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl RedemptionMilestone {
    pub fn badge(&self) -> Badge {
        Badge::new(self.badge_id, self.name, self.description, self.icon)
    }

    pub fn reached(&self, points: i64) -> bool {
        points >= self.threshold
    }
}

/// Evaluated in this order after every redemption grant
pub const REDEMPTION_MILESTONES: &[RedemptionMilestone] = &[
    RedemptionMilestone {
        threshold: 7,
        badge_id: REBORN_MIND,
        name: "Reborn Mind",
        description: "7 days of redemption progress",
        icon: "✨",
    },
    RedemptionMilestone {
        threshold: 30,
        badge_id: CHARACTER_GROWTH,
        name: "Character Growth Champion",
        description: "30 days of redemption progress",
        icon: "🌟",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_ordered_by_threshold() {
        let thresholds: Vec<i64> = REDEMPTION_MILESTONES.iter().map(|m| m.threshold).collect();
        let mut sorted = thresholds.clone();
        sorted.sort();
        assert_eq!(thresholds, sorted);
    }

    #[test]
    fn test_badge_json_uses_camel_case() {
        let mut badge = REDEMPTION_MILESTONES[0].badge();
        assert!(!serde_json::to_string(&badge).unwrap().contains("unlockedAt"));

        badge.unlocked_at = Some(42);
        let json = serde_json::to_value(&badge).unwrap();
        assert_eq!(json["id"], "reborn-mind");
        assert_eq!(json["unlockedAt"], 42);
    }
}
