// crates/veris-graph/src/stats.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::TrustGraph;

/// Summary statistics over a trust graph, deterministically ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    pub claim_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Tag frequencies, most frequent first, ties by tag name.
    pub top_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl NetworkStats {
    pub fn collect(graph: &TrustGraph) -> Self {
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for claim in graph.claims() {
            for tag in &claim.tags {
                *frequencies.entry(tag.as_str()).or_default() += 1;
            }
        }
        let mut top_tags: Vec<TagCount> = frequencies
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        top_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

        NetworkStats {
            claim_count: graph.claim_count(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            top_tags,
        }
    }
}
