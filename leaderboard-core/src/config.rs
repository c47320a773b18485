//! Ranking options and the override layer applied on top of board defaults.

use serde::{Deserialize, Serialize};

use crate::error::{LeaderboardError, Result};
use crate::metric::MetricPolicy;

/// How groups are ordered in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Descending metric total, first-seen order on ties.
    #[default]
    ByTotal,
    /// Listed keys first, in this order. Unlisted groups follow by total.
    Fixed(Vec<String>),
}

/// Minimum on a secondary numeric field a record must reach to be ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualifier {
    pub field: String,
    pub min: f64,
}

impl Qualifier {
    pub fn new(field: impl Into<String>, min: f64) -> Self {
        Self {
            field: field.into(),
            min,
        }
    }
}

/// Options controlling one ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Keep only the first N ranked rows per group (or overall when flat).
    pub top_n: Option<usize>,
    pub policy: MetricPolicy,
    pub group_order: GroupOrder,
    pub qualifier: Option<Qualifier>,
}

impl RankOptions {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == Some(0) {
            return Err(LeaderboardError::InvalidOption(
                "top_n must be at least 1".to_string(),
            ));
        }
        if let Some(q) = &self.qualifier {
            if !q.min.is_finite() {
                return Err(LeaderboardError::InvalidOption(format!(
                    "qualifier minimum for `{}` must be finite",
                    q.field
                )));
            }
            if q.field.trim().is_empty() {
                return Err(LeaderboardError::InvalidOption(
                    "qualifier field must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Layer `overrides` on top of these options. Set fields win.
    pub fn merge(&self, overrides: &RankOverrides) -> RankOptions {
        let mut merged = self.clone();
        if let Some(top_n) = overrides.top_n {
            merged.top_n = Some(top_n);
        }
        if let Some(policy) = overrides.policy {
            merged.policy = policy;
        }
        if let Some(order) = &overrides.group_order {
            merged.group_order = order.clone();
        }
        if let Some(min) = overrides.min_qualifying {
            // A bare minimum only makes sense against the board's own field.
            if let Some(q) = merged.qualifier.as_mut() {
                q.min = min;
            }
        }
        if let Some(q) = &overrides.qualifier {
            merged.qualifier = Some(q.clone());
        }
        merged
    }
}

/// Partial options, as read from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOverrides {
    pub top_n: Option<usize>,
    pub policy: Option<MetricPolicy>,
    pub group_order: Option<GroupOrder>,
    pub qualifier: Option<Qualifier>,
    pub min_qualifying: Option<f64>,
}

impl RankOverrides {
    /// Combine two override layers; `other` wins where both are set.
    pub fn layer(mut self, other: RankOverrides) -> RankOverrides {
        if other.top_n.is_some() {
            self.top_n = other.top_n;
        }
        if other.policy.is_some() {
            self.policy = other.policy;
        }
        if other.group_order.is_some() {
            self.group_order = other.group_order;
        }
        if other.qualifier.is_some() {
            self.qualifier = other.qualifier;
        }
        if other.min_qualifying.is_some() {
            self.min_qualifying = other.min_qualifying;
        }
        self
    }
}
