use serde::{Deserialize, Serialize};

/// How a depth-0 node turns the White-centric evaluation into a search score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafSign {
    /// Negate when the node is maximizing, return as-is when minimizing.
    #[default]
    Legacy,
    /// Always score from Black's side (`-evaluate`), matching Black as the
    /// maximizing player.
    Consistent,
}

/// Which moves a node expands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSet {
    #[default]
    Legal,
    /// Legal moves followed by the pseudo-legal moves not already listed.
    LegalAndPseudoLegal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched from the root.
    pub depth: u8,
    pub leaf_sign: LeafSign,
    pub candidates: CandidateSet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            leaf_sign: LeafSign::default(),
            candidates: CandidateSet::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}
