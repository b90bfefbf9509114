//! A sales pursuit tracked through a fixed stage lifecycle.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Sales-pipeline stage of an opportunity.
///
/// The set is closed: exactly these five values exist, and `New` is the
/// default for freshly created opportunities. The same spellings are used
/// on the wire and in the database (a CHECK constraint mirrors this enum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityStage {
    #[default]
    New,
    Qualified,
    Proposal,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl OpportunityStage {
    /// Get the canonical string form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityStage::New => "New",
            OpportunityStage::Qualified => "Qualified",
            OpportunityStage::Proposal => "Proposal",
            OpportunityStage::ClosedWon => "Closed Won",
            OpportunityStage::ClosedLost => "Closed Lost",
        }
    }
}

impl std::fmt::Display for OpportunityStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown opportunity stage: {0}")]
pub struct StageParseError(pub String);

impl FromStr for OpportunityStage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(OpportunityStage::New),
            "Qualified" => Ok(OpportunityStage::Qualified),
            "Proposal" => Ok(OpportunityStage::Proposal),
            "Closed Won" => Ok(OpportunityStage::ClosedWon),
            "Closed Lost" => Ok(OpportunityStage::ClosedLost),
            other => Err(StageParseError(other.to_string())),
        }
    }
}

/// An opportunity record. `customer_id` always references an existing customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: i64,
    pub customer_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub stage: OpportunityStage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_default_is_new() {
        assert_eq!(OpportunityStage::default(), OpportunityStage::New);
    }

    #[test]
    fn test_stage_string_round_trip() {
        let stages = [
            OpportunityStage::New,
            OpportunityStage::Qualified,
            OpportunityStage::Proposal,
            OpportunityStage::ClosedWon,
            OpportunityStage::ClosedLost,
        ];
        for stage in stages {
            assert_eq!(stage.as_str().parse::<OpportunityStage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_stage_rejects_unknown_value() {
        let err = "Negotiation".parse::<OpportunityStage>().unwrap_err();
        assert_eq!(err.0, "Negotiation");
    }

    #[test]
    fn test_stage_serialization_uses_spaced_names() {
        let json = serde_json::to_string(&OpportunityStage::ClosedWon).unwrap();
        assert_eq!(json, "\"Closed Won\"");

        let parsed: OpportunityStage = serde_json::from_str("\"Closed Lost\"").unwrap();
        assert_eq!(parsed, OpportunityStage::ClosedLost);
    }

    #[test]
    fn test_stage_deserialization_rejects_unknown_value() {
        let result: Result<OpportunityStage, _> = serde_json::from_str("\"Won\"");
        assert!(result.is_err());
    }
}
