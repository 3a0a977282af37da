//! Reward points earned for keeping records and the tiers they unlock.

use serde::Serialize;

/// Points for each income or expense record.
pub const POINTS_PER_ENTRY: u64 = 10;
/// Points for each journal answer.
pub const POINTS_PER_JOURNAL_ANSWER: u64 = 25;
/// Points for each completed savings goal.
pub const POINTS_PER_COMPLETED_GOAL: u64 = 100;

/// What a user has done that earns points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardActivity {
    pub entries: u64,
    pub journal_answers: u64,
    pub completed_goals: u64,
}

impl RewardActivity {
    /// The points earned for this activity.
    pub fn points(&self) -> u64 {
        self.entries * POINTS_PER_ENTRY
            + self.journal_answers * POINTS_PER_JOURNAL_ANSWER
            + self.completed_goals * POINTS_PER_COMPLETED_GOAL
    }
}

/// Reward tiers in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl RewardTier {
    const ALL: [RewardTier; 4] = [
        RewardTier::Bronze,
        RewardTier::Silver,
        RewardTier::Gold,
        RewardTier::Platinum,
    ];

    /// The fewest points needed to reach this tier.
    pub fn threshold(self) -> u64 {
        match self {
            RewardTier::Bronze => 0,
            RewardTier::Silver => 250,
            RewardTier::Gold => 1000,
            RewardTier::Platinum => 2500,
        }
    }

    /// The highest tier whose threshold `points` meets.
    pub fn for_points(points: u64) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| points >= tier.threshold())
            .unwrap_or(RewardTier::Bronze)
    }

    fn next(self) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| *tier > self)
    }
}

/// A user's points and where they stand in the tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardStatus {
    pub points: u64,
    pub tier: RewardTier,
    /// `None` once the top tier has been reached.
    pub next_tier: Option<RewardTier>,
    pub points_to_next_tier: u64,
}

/// Work out the reward status for `activity`.
pub fn reward_status(activity: RewardActivity) -> RewardStatus {
    let points = activity.points();
    let tier = RewardTier::for_points(points);
    let next_tier = tier.next();
    let points_to_next_tier = next_tier
        .map(|next| next.threshold().saturating_sub(points))
        .unwrap_or(0);

    RewardStatus {
        points,
        tier,
        next_tier,
        points_to_next_tier,
    }
}
