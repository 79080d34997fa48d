//! Export
//!
//! Read-only renderings of a tree for download: a JSON envelope, a flat CSV
//! table (one row per node in pre-order) and an indented plain-text outline.

use crate::models::{CategoryCounts, EmploymentCategory, OrgNode};
use crate::services::statistics::SubtreeStats;
use crate::services::traversal::walk;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::ops::ControlFlow;
use std::str::FromStr;
use thiserror::Error;

/// Version stamped into JSON exports
pub const EXPORT_VERSION: &str = "2.0.0";

const TEXT_TITLE: &str = "Organization Structure";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer could not be flushed: {0}")]
    Buffer(String),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// `excel` is accepted as an alias for CSV.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" | "excel" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One flattened node with its level and subtree totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// 1-based depth
    pub level: usize,
    pub id: String,
    pub label: String,
    pub name: Option<String>,
    pub employment_type: Option<String>,
    pub child_count: usize,
    /// Aggregate over the node and its descendants
    pub stats: SubtreeStats,
}

/// Flatten the tree in pre-order, computing every subtree aggregate in a
/// single pass.
pub fn export_rows(root: &OrgNode) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    collect_rows(root, 1, &mut rows);
    rows
}

fn collect_rows(node: &OrgNode, level: usize, rows: &mut Vec<ExportRow>) -> SubtreeStats {
    let slot = rows.len();
    rows.push(ExportRow {
        level,
        id: node.id.clone(),
        label: node.label.clone(),
        name: node.name.clone(),
        employment_type: node.employment_type.clone(),
        child_count: node.children.len(),
        stats: SubtreeStats::default(),
    });

    let mut stats = SubtreeStats::default();
    stats.record(node);
    for child in &node.children {
        stats += collect_rows(child, level + 1, rows);
    }
    rows[slot].stats = stats;
    stats
}

/// CSV table with a header row. Category columns cover the whole subtree.
pub fn export_csv(root: &OrgNode) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "level".to_string(),
        "label".to_string(),
        "name".to_string(),
        "employmentType".to_string(),
        "id".to_string(),
        "childCount".to_string(),
        "capacity".to_string(),
        "totalPersonnel".to_string(),
    ];
    header.extend(EmploymentCategory::ALL.iter().map(|c| c.as_str().to_string()));
    wtr.write_record(&header)?;

    for row in export_rows(root) {
        let mut record = vec![
            row.level.to_string(),
            row.label,
            row.name.unwrap_or_default(),
            row.employment_type.unwrap_or_default(),
            row.id,
            row.child_count.to_string(),
            row.stats.capacity.to_string(),
            row.stats.total_personnel.to_string(),
        ];
        record.extend(
            EmploymentCategory::ALL
                .iter()
                .map(|c| row.stats.count(*c).to_string()),
        );
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Indented outline, two spaces per level.
pub fn export_text(root: &OrgNode) -> String {
    let mut text = format!("{}\n{}\n\n", TEXT_TITLE, "=".repeat(50));
    let _ = walk(root, |visit| {
        let node = visit.node;
        let indent = "  ".repeat(visit.depth());
        // Writing into a String cannot fail
        let _ = writeln!(text, "{}{}. {}", indent, visit.depth() + 1, node.label);
        if let Some(name) = node.name.as_deref().filter(|n| !n.trim().is_empty()) {
            let _ = writeln!(text, "{}   Name: {}", indent, name);
        }
        if let Some(kind) = node.employment_type.as_deref().filter(|k| !k.trim().is_empty()) {
            let _ = writeln!(text, "{}   Employment type: {}", indent, kind);
        }
        if !node.children.is_empty() {
            let _ = writeln!(text, "{}   Sub-units: {}", indent, node.children.len());
        }
        text.push('\n');
        ControlFlow::<()>::Continue(())
    });
    text
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub total_nodes: usize,
    /// Number of distinct levels (a lone root has one)
    pub total_levels: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatistics {
    pub total_nodes: usize,
    pub total_personnel: usize,
    /// Occurrences of each raw `employmentType` value
    pub employment_types: BTreeMap<String, usize>,
    pub categories: CategoryCounts,
    /// Node count per level (root is level 0)
    pub levels: BTreeMap<usize, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub organization: OrgNode,
    pub export_info: ExportInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ExportStatistics>,
}

pub fn export_statistics(root: &OrgNode) -> ExportStatistics {
    let mut stats = ExportStatistics::default();
    let _ = walk(root, |visit| {
        let node = visit.node;
        stats.total_nodes += 1;
        *stats.levels.entry(visit.depth()).or_default() += 1;
        if node.has_person() {
            stats.total_personnel += 1;
        }
        if let Some(kind) = node.employment_type.as_deref().filter(|k| !k.is_empty()) {
            *stats.employment_types.entry(kind.to_string()).or_default() += 1;
        }
        stats.categories.increment(node.category());
        ControlFlow::<()>::Continue(())
    });
    stats
}

/// Build the JSON export envelope.
pub fn export_document(root: &OrgNode, include_stats: bool) -> JsonExport {
    let statistics = export_statistics(root);
    JsonExport {
        organization: root.clone(),
        export_info: ExportInfo {
            timestamp: Utc::now(),
            version: EXPORT_VERSION.to_string(),
            total_nodes: statistics.total_nodes,
            total_levels: statistics.levels.len(),
        },
        statistics: include_stats.then_some(statistics),
    }
}

/// Pretty-printed JSON export envelope.
pub fn export_json(root: &OrgNode, include_stats: bool) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&export_document(
        root,
        include_stats,
    ))?)
}

/// Render `root` in the requested format.
pub fn export(root: &OrgNode, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => export_json(root, true),
        ExportFormat::Csv => export_csv(root),
        ExportFormat::Text => Ok(export_text(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> OrgNode {
        OrgNode::new("board", "Board")
            .with_name("Maryam")
            .with_child(OrgNode::new("finance", "Finance, Budget").with_employment_type("contractor"))
            .with_child(
                OrgNode::new("hr", "HR")
                    .with_employment_type("military")
                    .with_child(OrgNode::new("hiring", "Hiring").with_name("Ali")),
            )
    }

    #[test]
    fn test_rows_are_preorder_with_subtree_stats() {
        let rows = export_rows(&board());
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["board", "finance", "hr", "hiring"]);

        assert_eq!(rows[0].level, 1);
        assert_eq!(rows[0].stats.capacity, 4);
        assert_eq!(rows[0].stats.total_personnel, 2);
        assert_eq!(rows[2].level, 2);
        assert_eq!(rows[2].stats.capacity, 2);
        assert_eq!(rows[2].stats.count(EmploymentCategory::Military), 1);
        assert_eq!(rows[3].level, 3);
        assert_eq!(rows[3].child_count, 0);
    }

    #[test]
    fn test_csv_quotes_and_columns() {
        let csv = export_csv(&board()).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("level,label,name,employmentType,id,childCount,capacity"));
        assert!(header.ends_with("uncategorized"));

        let finance = csv.lines().nth(2).unwrap();
        assert!(finance.starts_with("2,\"Finance, Budget\",,contractor,finance,0,1,0"));
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_text_outline() {
        let text = export_text(&board());
        assert!(text.starts_with("Organization Structure\n=================================================="));
        assert!(text.contains("1. Board\n   Name: Maryam\n   Sub-units: 2\n"));
        assert!(text.contains("  2. HR\n     Employment type: military\n"));
        assert!(text.contains("    3. Hiring\n"));
    }

    #[test]
    fn test_json_envelope() {
        let envelope = export_document(&board(), true);
        assert_eq!(envelope.export_info.version, "2.0.0");
        assert_eq!(envelope.export_info.total_nodes, 4);
        assert_eq!(envelope.export_info.total_levels, 3);

        let stats = envelope.statistics.unwrap();
        assert_eq!(stats.levels.get(&1), Some(&2));
        assert_eq!(stats.employment_types.get("military"), Some(&1));
        assert_eq!(stats.categories.uncategorized, 2);

        let json: serde_json::Value =
            serde_json::from_str(&export_json(&board(), false).unwrap()).unwrap();
        assert_eq!(json["organization"]["id"], "board");
        assert!(json["exportInfo"]["totalNodes"].is_number());
        assert!(json.get("statistics").is_none());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
