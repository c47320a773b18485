use std::fmt;

use serde::Serialize;

/// Crown awarded next to a ranked row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Gold,
    Silver,
    Bronze,
    None,
}

impl BadgeTier {
    /// Rank 1 is gold, 2 silver, 3 bronze. Everything else goes without.
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            1 => BadgeTier::Gold,
            2 => BadgeTier::Silver,
            3 => BadgeTier::Bronze,
            _ => BadgeTier::None,
        }
    }

    /// Crown colour used by the web renderer.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            BadgeTier::Gold => Some("#FFD700"),
            BadgeTier::Silver => Some("#C0C0C0"),
            BadgeTier::Bronze => Some("#CD7F32"),
            BadgeTier::None => None,
        }
    }

    pub fn is_crowned(&self) -> bool {
        !matches!(self, BadgeTier::None)
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeTier::Gold => write!(f, "gold"),
            BadgeTier::Silver => write!(f, "silver"),
            BadgeTier::Bronze => write!(f, "bronze"),
            BadgeTier::None => write!(f, "-"),
        }
    }
}

/// How many crowns of each tier a result hands out.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeTally {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub unbadged: u32,
}

impl BadgeTally {
    pub fn record(&mut self, badge: BadgeTier) {
        match badge {
            BadgeTier::Gold => self.gold += 1,
            BadgeTier::Silver => self.silver += 1,
            BadgeTier::Bronze => self.bronze += 1,
            BadgeTier::None => self.unbadged += 1,
        }
    }

    pub fn merge(&mut self, other: &BadgeTally) {
        self.gold += other.gold;
        self.silver += other.silver;
        self.bronze += other.bronze;
        self.unbadged += other.unbadged;
    }

    pub fn total(&self) -> u32 {
        self.gold + self.silver + self.bronze + self.unbadged
    }

    pub fn describe(&self) -> String {
        format!(
            "gold: {}, silver: {}, bronze: {}, unbadged: {}",
            self.gold, self.silver, self.bronze, self.unbadged
        )
    }
}
