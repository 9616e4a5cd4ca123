//! Recovery milestone ladder.

use serde::{Deserialize, Serialize};

/// Fixed milestones shown alongside the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    OneDay,
    OneWeek,
    ThirtyDays,
    NinetyDays,
    SixMonths,
    OneYear,
}

impl Milestone {
    /// All milestones in ascending order.
    pub const ALL: [Milestone; 6] = [
        Milestone::OneDay,
        Milestone::OneWeek,
        Milestone::ThirtyDays,
        Milestone::NinetyDays,
        Milestone::SixMonths,
        Milestone::OneYear,
    ];

    /// Days of sobriety needed to reach this milestone.
    pub fn days(&self) -> u32 {
        match self {
            Milestone::OneDay => 1,
            Milestone::OneWeek => 7,
            Milestone::ThirtyDays => 30,
            Milestone::NinetyDays => 90,
            Milestone::SixMonths => 180,
            Milestone::OneYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Milestone::OneDay => "1 day",
            Milestone::OneWeek => "1 week",
            Milestone::ThirtyDays => "30 days",
            Milestone::NinetyDays => "90 days",
            Milestone::SixMonths => "6 months",
            Milestone::OneYear => "1 year",
        }
    }

    /// Milestones already reached after `days_sober` days.
    pub fn reached(days_sober: u32) -> Vec<Milestone> {
        Self::ALL
            .into_iter()
            .filter(|m| m.days() <= days_sober)
            .collect()
    }

    /// First milestone not yet reached, if any remain.
    pub fn next(days_sober: u32) -> Option<Milestone> {
        Self::ALL.into_iter().find(|m| m.days() > days_sober)
    }
}
