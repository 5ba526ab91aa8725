//! Investment edges
//!
//! Every edge points from an investor to the company it funded and carries
//! the details of the funding round.

use super::types::{EdgeId, NodeId};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Round type used when the source data has none
pub const UNKNOWN_ROUND_TYPE: &str = "unknown";

/// Funding-round metadata attached to an investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    /// Round type, e.g. `angel`, `series-a`
    pub round_type: String,
    /// Amount raised in the round (USD)
    pub raised_amount: Option<f64>,
    /// Date the round closed
    pub date: Option<NaiveDate>,
    /// Pre-money valuation (USD)
    pub pre_money_valuation: Option<f64>,
    /// Post-money valuation (USD)
    pub post_money_valuation: Option<f64>,
}

impl Default for FundingRound {
    fn default() -> Self {
        Self {
            round_type: UNKNOWN_ROUND_TYPE.to_string(),
            raised_amount: None,
            date: None,
            pre_money_valuation: None,
            post_money_valuation: None,
        }
    }
}

impl FundingRound {
    /// Round of the given type with no further details
    pub fn of_type(round_type: impl Into<String>) -> Self {
        Self {
            round_type: round_type.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_raised_amount(mut self, amount: f64) -> Self {
        self.raised_amount = Some(amount);
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

/// Parse the date formats found in the funding data.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`;
/// anything else (including `unknown` and `nan`) yields `None`.
pub fn parse_round_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// A directed investment edge (investor -> company)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Dense identifier for this edge
    pub id: EdgeId,

    /// External identifier, `"{investor_key}-{company_key}"`
    pub key: String,

    /// Investor
    pub source: NodeId,

    /// Funded company
    pub target: NodeId,

    /// Round details
    pub round: FundingRound,
}

impl Edge {
    pub fn new(id: EdgeId, key: impl Into<String>, source: NodeId, target: NodeId, round: FundingRound) -> Self {
        Edge {
            id,
            key: key.into(),
            source,
            target,
            round,
        }
    }

    /// External id derived from the endpoint keys
    pub fn key_for(source_key: &str, target_key: &str) -> String {
        format!("{}-{}", source_key, target_key)
    }

    /// Check if this edge touches a node
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
