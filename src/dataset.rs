// File: src/dataset.rs
use crate::core::glossary::GlossaryEntry;
use crate::core::priority::TeamWeights;
use crate::core::types::KpiRecord;
use crate::error::DatasetError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Loads a record set from a JSON array of spreadsheet-shaped objects.
pub fn load_records(path: &Path) -> Result<Vec<KpiRecord>, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Saves records atomically: write to a temp file in the target directory,
/// then persist over the destination.
pub fn save_records(records: &[KpiRecord], path: &Path) -> Result<(), DatasetError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer_pretty(writer, records)?;

    temp_file
        .persist(path)
        .map_err(|e| DatasetError::Io(e.into()))?;
    Ok(())
}

/// Loads a team-to-weight map, e.g. `{"Sales": 1.5, "Data": 0.8}`.
pub fn load_weights(path: &Path) -> Result<TeamWeights, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_weights(weights: &TeamWeights, path: &Path) -> Result<(), DatasetError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer_pretty(writer, weights)?;

    temp_file
        .persist(path)
        .map_err(|e| DatasetError::Io(e.into()))?;
    Ok(())
}

/// Writes the glossary as CSV in the spreadsheet export shape. List columns
/// are joined with ", " and fields are quoted only when they need it.
pub fn export_glossary_csv(entries: &[GlossaryEntry], path: &Path) -> Result<(), DatasetError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    writeln!(
        temp_file,
        "Standard_Metric_Name,Teams,Original_Metrics,Standard_Definition"
    )?;
    for entry in entries {
        writeln!(
            temp_file,
            "{},{},{},{}",
            csv_field(&entry.standard_name),
            csv_field(&entry.teams.join(", ")),
            csv_field(&entry.original_metric_names.join(", ")),
            csv_field(&entry.standard_definition),
        )?;
    }

    temp_file
        .persist(path)
        .map_err(|e| DatasetError::Io(e.into()))?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// A small cross-team record set in the spreadsheet shape. Used as seed data
/// by the binaries when no records file is given.
pub fn sample_records() -> Vec<KpiRecord> {
    vec![
        KpiRecord::new(
            "Marketing",
            "Engagement Rate",
            "Percentage of recipients who click at least one link in a campaign email",
        ),
        KpiRecord::new(
            "Data",
            "Engagement Rate",
            "Average session duration across logged-in users",
        ),
        KpiRecord::new(
            "Customer Success",
            "Engagement Score",
            "Weighted mix of product logins, support interactions and webinar attendance",
        ),
        KpiRecord::new(
            "Marketing",
            "Conversion Rate",
            "Share of campaign leads that complete the sign up CTA",
        ),
        KpiRecord::new(
            "Sales",
            "Conversion Rate",
            "Percentage of qualified opportunities that become closed deals",
        ),
        KpiRecord::new(
            "Sales",
            "Conversion Ratio",
            "Closed deals divided by total pipeline opportunities",
        ),
        KpiRecord::new(
            "Product",
            "Feature Adoption",
            "Share of weekly active users who try a newly released feature",
        ),
        KpiRecord::new(
            "Product",
            "Power User Rate",
            "Users with five or more logins per week who complete a core flow",
        ),
        KpiRecord::new(
            "Customer Success",
            "Churn Risk",
            "Accounts with more than two support tickets in the last thirty days",
        ),
        KpiRecord::new(
            "Data",
            "Churn Rate",
            "Percentage of accounts with no return visit within thirty days",
        ),
        KpiRecord::new(
            "Sales",
            "Churn",
            "Share of accounts lost during the quarter measured at contract end",
        ),
        KpiRecord::new(
            "Sales",
            "Lead Quality Score",
            "Demographic fit score assigned by SDRs during qualification",
        ),
        KpiRecord::new(
            "Marketing",
            "Lead Quality Score",
            "Engagement-weighted score from email and webinar touchpoints",
        ),
        KpiRecord::new(
            "Finance",
            "Customer Lifetime Value",
            "Average revenue per account over the full contract period",
        ),
        KpiRecord::new(
            "Product",
            "Customer Lifetime Value",
            "Projected value based on feature usage depth and retention curve",
        ),
        KpiRecord::new(
            "Finance",
            "Customer Acquisition Cost",
            "Total sales and marketing spend divided by new customers won",
        ),
        KpiRecord::new(
            "Customer Success",
            "Net Promoter Score",
            "Share of promoters minus detractors from the quarterly NPS survey",
        ),
    ]
}
