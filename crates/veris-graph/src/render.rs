// crates/veris-graph/src/render.rs
//
// DOT and ASCII renderings of the trust graph.
//
// Emission is sorted by (issuer identity, proof hash) so output is
// deterministic regardless of map iteration order.

use std::fmt::Write;

use crate::graph::{Edge, TrustGraph};

/// Edges sorted by the stable emission key.
fn sorted_edges(graph: &TrustGraph) -> Vec<&Edge> {
    let mut edges: Vec<&Edge> = graph.edges().iter().collect();
    edges.sort_by(|a, b| {
        a.issuer
            .cmp(&b.issuer)
            .then_with(|| a.proof_hash.cmp(&b.proof_hash))
    });
    edges
}

/// Graphviz DOT rendering of the trust graph.
///
/// Edge labels carry the claim statement and weight.
pub fn to_dot(graph: &TrustGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph TrustGraph {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box, style=rounded];\n");

    for id in graph.identities() {
        let _ = writeln!(out, "  {:?};", id.as_str());
    }
    for edge in sorted_edges(graph) {
        let label = graph
            .claim(&edge.proof_hash)
            .map(|c| c.statement.as_str())
            .unwrap_or("");
        let _ = writeln!(
            out,
            "  {:?} -> {:?} [label=\"{} ({:.2})\"];",
            edge.issuer.as_str(),
            edge.subject.as_str(),
            label.replace('"', "'"),
            edge.weight
        );
    }
    out.push_str("}\n");
    out
}

/// ASCII rendering: one `issuer --statement--> subject` line per edge.
pub fn to_ascii(graph: &TrustGraph) -> String {
    let mut out = String::new();
    for edge in sorted_edges(graph) {
        let label = graph
            .claim(&edge.proof_hash)
            .map(|c| c.statement.as_str())
            .unwrap_or("");
        let _ = writeln!(
            out,
            "{} --{}--> {} [{:.2}]",
            pad_right(edge.issuer.as_str(), 20),
            pad_center(label, 14),
            edge.subject.as_str(),
            edge.weight
        );
    }
    out
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.chars().take(width).collect()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

fn pad_center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let padding = width - len;
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(padding - left))
}
