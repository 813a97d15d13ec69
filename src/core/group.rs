// src/core/group.rs
use crate::core::types::{KpiRecord, NormalizedKey};
use std::collections::HashMap;

/// Groups items under a derived string key. First-seen order of keys and the
/// relative order of members inside a group are both part of the contract.
pub fn group_by<T, F>(items: &[T], key_of: F) -> Vec<(NormalizedKey, Vec<T>)>
where
    T: Clone,
    F: Fn(&T) -> NormalizedKey,
{
    let mut groups: Vec<(NormalizedKey, Vec<T>)> = Vec::new();
    let mut index: HashMap<NormalizedKey, usize> = HashMap::new();

    for item in items {
        let key = key_of(item);
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(item.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item.clone()]));
            }
        }
    }

    groups
}

/// Distinct team names in first-appearance order.
pub fn unique_teams(records: &[KpiRecord]) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();
    for record in records {
        if !teams.contains(&record.team) {
            teams.push(record.team.clone());
        }
    }
    teams
}
