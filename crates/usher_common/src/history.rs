//! Bounded recent-interaction buffer and behavior profiling.
//!
//! Individual events are not kept beyond this buffer; the periodic
//! analysis task folds it into a [`BehaviorProfile`] for the
//! presentation layer.

use crate::interaction::InteractionRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default capacity of the recent-history buffer.
pub const DEFAULT_HISTORY_CAP: usize = 100;

/// Ring buffer of the most recent interactions.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    buf: VecDeque<InteractionRecord>,
    cap: usize,
}

impl RecentHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(cap.min(1024)),
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, record: InteractionRecord) {
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn records(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.buf.iter()
    }

    pub fn profile(&self) -> BehaviorProfile {
        BehaviorProfile::from_records(self.buf.iter())
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

/// Coarse engagement style derived from the dominant interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStyle {
    /// Mostly browsing: navigation, mascot visits
    Explorer,
    /// Mostly transacting: purchases, portfolio checks
    Investor,
    /// Mostly learning: lessons, help lookups
    Student,
    #[default]
    Balanced,
}

impl std::fmt::Display for EngagementStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explorer => write!(f, "explorer"),
            Self::Investor => write!(f, "investor"),
            Self::Student => write!(f, "student"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Aggregated view of the recent buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub sample_size: usize,
    pub total_points: u64,
    pub by_kind: HashMap<String, u64>,
    pub dominant_kind: Option<String>,
    pub style: EngagementStyle,
}

impl BehaviorProfile {
    pub fn from_records<'a>(records: impl Iterator<Item = &'a InteractionRecord>) -> Self {
        let mut profile = Self::default();

        for record in records {
            profile.sample_size += 1;
            profile.total_points += record.points;
            *profile.by_kind.entry(record.kind.clone()).or_insert(0) += 1;
        }

        // Ties break on label so repeated analysis of the same buffer is stable.
        profile.dominant_kind = profile
            .by_kind
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(kind, _)| kind.clone());

        profile.style = match profile.dominant_kind.as_deref() {
            Some("navigation") | Some("mascot_interaction") => EngagementStyle::Explorer,
            Some("purchase") | Some("portfolio_view") => EngagementStyle::Investor,
            Some("learn_complete") | Some("help_request") => EngagementStyle::Student,
            _ => EngagementStyle::Balanced,
        };

        profile
    }
}
