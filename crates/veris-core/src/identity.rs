use std::fmt;

use serde::{Deserialize, Serialize};

/// An identity on the trust network.
///
/// Opaque string key — the core interprets no internal structure. Callers
/// use conventions like `twitter:<handle>`, `project:<symbol>`, or a DID.
/// Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Identity(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Identity(s)
    }
}

/// Payload attached to a graph node.
///
/// Closed tagged variant over the payload kinds the network needs, rather
/// than an open any-typed field. Identity metadata is currently the only
/// kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodePayload {
    /// An identity participating in the network as issuer or subject.
    Identity { id: Identity },
}

impl NodePayload {
    /// The identity this payload describes.
    pub fn identity(&self) -> &Identity {
        match self {
            NodePayload::Identity { id } => id,
        }
    }
}
