//! Grouped boards: totals, group ordering and per-group ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::config::{GroupOrder, RankOptions};
use crate::error::Result;
use crate::ranking::{assign_ranks, truncate, RankedRecord};
use crate::record::{extract_records, retain_qualifying, FieldSpec, Record, Row};

/// Running metric totals per group, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct GroupTotals {
    entries: Vec<GroupTotal>,
    positions: HashMap<String, usize>,
}

/// Sum of a group's metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

impl GroupTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, metric: f64) {
        match self.positions.get(key) {
            Some(&pos) => self.entries[pos].total += metric,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push(GroupTotal {
                    key: key.to_string(),
                    total: metric,
                });
            }
        }
    }

    pub fn total(&self, key: &str) -> Option<f64> {
        self.positions.get(key).map(|&pos| self.entries[pos].total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group keys in display order.
    pub fn ordered(&self, order: &GroupOrder) -> Vec<GroupTotal> {
        let mut by_total = self.entries.clone();
        // Stable: equal totals keep first-seen order.
        by_total.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

        match order {
            GroupOrder::ByTotal => by_total,
            GroupOrder::Fixed(keys) => {
                let mut ordered: Vec<GroupTotal> = keys
                    .iter()
                    .enumerate()
                    .filter(|(i, k)| !keys[..*i].contains(*k))
                    .filter_map(|(_, k)| self.positions.get(k).map(|&pos| self.entries[pos].clone()))
                    .collect();
                ordered.extend(by_total.into_iter().filter(|g| !keys.contains(&g.key)));
                ordered
            }
        }
    }
}

/// One category and its ranked members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub total: f64,
    /// Members that qualified, before truncation.
    pub qualified: usize,
    pub members: Vec<RankedRecord>,
}

/// Group rows by `fields.group`, rank each group, and order the groups.
///
/// The group order is part of the return value; nothing is cached between
/// calls.
pub fn group_and_rank(rows: &[Row], fields: &FieldSpec, options: &RankOptions) -> Result<Vec<Group>> {
    options.validate()?;

    let records = extract_records(rows, fields, options, true)?;
    let records = retain_qualifying(records, options.qualifier.as_ref());

    let mut totals = GroupTotals::new();
    let mut members: HashMap<String, Vec<Record>> = HashMap::new();
    for record in records {
        totals.add(&record.group_key, record.metric);
        members
            .entry(record.group_key.clone())
            .or_default()
            .push(record);
    }

    debug!(
        rows = rows.len(),
        groups = totals.len(),
        metric = %fields.metric,
        "ranking grouped board"
    );

    let groups = totals
        .ordered(&options.group_order)
        .into_iter()
        .map(|GroupTotal { key, total }| {
            let records = members.remove(&key).unwrap_or_default();
            let qualified = records.len();
            Group {
                members: truncate(assign_ranks(records), options.top_n),
                key,
                total,
                qualified,
            }
        })
        .collect();

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::BadgeTier;
    use crate::config::Qualifier;
    use crate::metric::MetricPolicy;
    use serde_json::{json, Value};

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    fn fields() -> FieldSpec {
        FieldSpec::new("Region", "SDR", "Appointments")
    }

    fn keys(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.key.as_str()).collect()
    }

    #[test]
    fn totals_accumulate_in_first_seen_order() {
        let mut totals = GroupTotals::new();
        totals.add("Europe", 14.0);
        totals.add("Asia", 37.0);
        totals.add("Europe", 12.0);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.total("Europe"), Some(26.0));
        assert_eq!(totals.total("Asia"), Some(37.0));
        assert_eq!(totals.total("Middle East"), None);
    }

    #[test]
    fn equal_totals_keep_first_seen_order() {
        let mut totals = GroupTotals::new();
        totals.add("b", 5.0);
        totals.add("a", 5.0);
        totals.add("c", 9.0);

        let order: Vec<String> = totals
            .ordered(&GroupOrder::ByTotal)
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn fixed_order_leads_then_totals_follow() {
        let mut totals = GroupTotals::new();
        totals.add("Asia", 101.0);
        totals.add("Europe", 44.0);
        totals.add("America", 72.0);
        totals.add("Middle East", 16.0);

        let order = GroupOrder::Fixed(vec![
            "America".to_string(),
            "Europe".to_string(),
            "Mars".to_string(),
            "America".to_string(),
        ]);
        let ordered: Vec<String> = totals.ordered(&order).into_iter().map(|g| g.key).collect();
        assert_eq!(ordered, vec!["America", "Europe", "Asia", "Middle East"]);
    }

    #[test]
    fn groups_ordered_by_descending_total() {
        let input = rows(vec![
            json!({ "Region": "Europe", "SDR": "Zuhaib", "Appointments": "14" }),
            json!({ "Region": "Asia", "SDR": "Maryam Rehman", "Appointments": "37" }),
            json!({ "Region": "Europe", "SDR": "Usman Hussain", "Appointments": "12" }),
            json!({ "Region": "Middle East", "SDR": "Babar", "Appointments": "11" }),
        ]);
        let groups = group_and_rank(&input, &fields(), &RankOptions::default()).unwrap();

        assert_eq!(keys(&groups), vec!["Asia", "Europe", "Middle East"]);
        assert_eq!(groups[1].total, 26.0);
        assert_eq!(groups[1].qualified, 2);
        assert_eq!(groups[1].members[0].record.subject, "Zuhaib");
        assert_eq!(groups[1].members[1].badge, BadgeTier::Silver);
    }

    #[test]
    fn ranking_is_per_group() {
        let input = rows(vec![
            json!({ "Region": "A", "SDR": "x", "Appointments": 5 }),
            json!({ "Region": "B", "SDR": "w", "Appointments": 1 }),
            json!({ "Region": "A", "SDR": "y", "Appointments": 5 }),
            json!({ "Region": "A", "SDR": "z", "Appointments": 3 }),
        ]);
        let groups = group_and_rank(&input, &fields(), &RankOptions::default()).unwrap();

        let a: Vec<(&str, u32, BadgeTier)> = groups[0]
            .members
            .iter()
            .map(|m| (m.record.subject.as_str(), m.rank, m.badge))
            .collect();
        assert_eq!(
            a,
            vec![
                ("x", 1, BadgeTier::Gold),
                ("y", 1, BadgeTier::Gold),
                ("z", 3, BadgeTier::Bronze),
            ]
        );
        assert_eq!(groups[1].members[0].rank, 1);
        assert_eq!(groups[1].members[0].badge, BadgeTier::Gold);
    }

    #[test]
    fn top_n_applies_per_group_after_ranking() {
        let input = rows(vec![
            json!({ "Region": "A", "SDR": "a1", "Appointments": 9 }),
            json!({ "Region": "A", "SDR": "a2", "Appointments": 7 }),
            json!({ "Region": "A", "SDR": "a3", "Appointments": 7 }),
            json!({ "Region": "B", "SDR": "b1", "Appointments": 2 }),
        ]);
        let options = RankOptions {
            top_n: Some(2),
            ..RankOptions::default()
        };
        let groups = group_and_rank(&input, &fields(), &options).unwrap();

        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[0].qualified, 3);
        assert_eq!(groups[0].members[1].rank, 2);
        assert_eq!(groups[0].total, 23.0);
        assert_eq!(groups[1].members.len(), 1);
    }

    #[test]
    fn qualifier_applies_before_totals() {
        let input = rows(vec![
            json!({ "Region": "A", "SDR": "a1", "Appointments": 9, "Calls": 1 }),
            json!({ "Region": "B", "SDR": "b1", "Appointments": 4, "Calls": 8 }),
            json!({ "Region": "A", "SDR": "a2", "Appointments": 2, "Calls": 6 }),
        ]);
        let options = RankOptions {
            qualifier: Some(Qualifier::new("Calls", 5.0)),
            ..RankOptions::default()
        };
        let groups = group_and_rank(&input, &fields(), &options).unwrap();

        assert_eq!(keys(&groups), vec!["B", "A"]);
        assert_eq!(groups[1].total, 2.0);
        assert_eq!(groups[1].members[0].record.subject, "a2");
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = group_and_rank(&[], &fields(), &RankOptions::default()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn strict_mode_surfaces_bad_rows() {
        let input = rows(vec![json!({ "Region": "A", "SDR": "x", "Appointments": "??" })]);
        let options = RankOptions {
            policy: MetricPolicy::Strict,
            ..RankOptions::default()
        };
        assert!(group_and_rank(&input, &fields(), &options).is_err());
    }
}
