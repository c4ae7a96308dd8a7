// crates/veris-cli/src/output.rs
//
// Output formatting utilities for the Veris CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use veris_graph::QueryResult;

/// One row of the `query` results table.
#[derive(Debug, Tabled)]
pub struct ResultRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Issuer")]
    pub issuer: String,
    #[tabled(rename = "Subject")]
    pub subject: String,
    #[tabled(rename = "Statement")]
    pub statement: String,
    #[tabled(rename = "Confidence")]
    pub confidence: String,
    #[tabled(rename = "Hops")]
    pub hops: String,
}

impl ResultRow {
    pub fn from_result(result: &QueryResult) -> Self {
        match result {
            QueryResult::Claim(s) => ResultRow {
                kind: "claim".to_string(),
                issuer: s.claim.issuer.to_string(),
                subject: s.claim.subject.to_string(),
                statement: s.claim.statement.clone(),
                confidence: format!("{:.3}", s.effective_confidence),
                hops: s.hop_count.to_string(),
            },
            QueryResult::Consensus(view) => ResultRow {
                kind: "consensus".to_string(),
                issuer: format!("{} claims", view.supporting_claims.len()),
                subject: view.subject.to_string(),
                statement: String::new(),
                confidence: format!("{:.3}", view.consensus_confidence),
                hops: String::new(),
            },
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}
