use crate::core::analyzer::{analyze, AnalysisResult};
use crate::core::glossary::{build_glossary, GlossaryEntry};
use crate::core::group::unique_teams;
use crate::core::priority::{
    compute_priority, group_into_clusters, sorted_by, PriorityRecord, SortDirection, SortField,
    TeamWeights,
};
use crate::core::scenarios::{build_scenarios, Scenario};
use crate::core::translator::{translate, Translation};
use crate::core::types::{KpiRecord, NormalizedKey};
use crate::dataset::{load_records, load_weights};
use crate::error::{DatasetError, TranslateError};
use std::path::Path;
use tracing::debug;

// The engine is composed of stateless analysis passes over one record set.
// Every view is recomputed from the current records and weights on each call.
pub struct KpiEngine {
    records: Vec<KpiRecord>,
    weights: TeamWeights,
}

impl KpiEngine {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            weights: TeamWeights::default(),
        }
    }

    pub fn with_records(records: Vec<KpiRecord>) -> Self {
        Self {
            records,
            weights: TeamWeights::default(),
        }
    }

    /// Loads records from a JSON file, falling back to an empty engine when
    /// the file is missing or malformed.
    pub fn from_file_or_new(path: &str) -> Self {
        let records = load_records(Path::new(path)).unwrap_or_default();
        Self::with_records(records)
    }

    pub fn records(&self) -> &[KpiRecord] {
        &self.records
    }

    pub fn add_record(&mut self, record: KpiRecord) {
        self.records.push(record);
    }

    pub fn set_records(&mut self, records: Vec<KpiRecord>) {
        self.records = records;
    }

    pub fn weights(&self) -> &TeamWeights {
        &self.weights
    }

    pub fn set_weight(&mut self, team: &str, weight: f64) {
        self.weights.set(team, weight);
    }

    pub fn reset_weights(&mut self) {
        self.weights = TeamWeights::default();
    }

    pub fn load_weights_from(&mut self, path: &str) -> Result<(), DatasetError> {
        self.weights = load_weights(Path::new(path))?;
        Ok(())
    }

    /// Teams present in the record set, in first-appearance order.
    pub fn teams(&self) -> Vec<String> {
        unique_teams(&self.records)
    }

    pub fn glossary(&self) -> Vec<GlossaryEntry> {
        debug!(records = self.records.len(), "building unified glossary");
        build_glossary(&self.records)
    }

    pub fn priority(&self) -> Vec<PriorityRecord> {
        compute_priority(&self.records, &self.weights)
    }

    pub fn priority_sorted(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> Vec<PriorityRecord> {
        sorted_by(&self.priority(), field, direction)
    }

    /// Cluster view over the default-sorted priority list, highest priority
    /// cluster first.
    pub fn priority_clusters(&self) -> Vec<(NormalizedKey, Vec<PriorityRecord>)> {
        let sorted = self.priority_sorted(SortField::default(), SortDirection::default());
        group_into_clusters(&sorted)
    }

    pub fn analyze(&self) -> AnalysisResult {
        debug!(records = self.records.len(), "running conflict analysis");
        analyze(&self.records)
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        build_scenarios(&self.records)
    }

    pub fn translate(
        &self,
        message: &str,
        from_team: &str,
        to_team: &str,
    ) -> Result<Translation, TranslateError> {
        debug!(from = from_team, to = to_team, "translating message");
        translate(&self.records, message, from_team, to_team)
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}
