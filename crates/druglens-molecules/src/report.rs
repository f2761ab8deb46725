//! Result records returned to callers.
//!
//! Field names follow the JSON shape consumed by the web page and API, so
//! several fields carry serde renames (`logP`, `TPSA`, `Lipinski_violations`, ...).

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// Categorical HIA estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Absorption {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassFail {
    Pass,
    Fail,
}

impl From<bool> for PassFail {
    fn from(value: bool) -> Self {
        if value { PassFail::Pass } else { PassFail::Fail }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicochemicalProperties {
    pub molecular_weight: f64,
    #[serde(rename = "logP")]
    pub logp: f64,
    #[serde(rename = "TPSA")]
    pub tpsa: f64,
    pub num_rings: u32,
    pub num_rotatable_bonds: u32,
}

/// Rough heuristic estimates derived from logP and weight, not model outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacokinetics {
    #[serde(rename = "HIA_absorption")]
    pub hia_absorption: Absorption,
    #[serde(rename = "BBB_penetration")]
    pub bbb_penetration: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugLikeness {
    /// 0..=4
    #[serde(rename = "Lipinski_violations")]
    pub lipinski_violations: u8,
    #[serde(rename = "Ghose_filter")]
    pub ghose_filter: YesNo,
    #[serde(rename = "Veber_rule")]
    pub veber_rule: PassFail,
    #[serde(rename = "Muegge_rule_pass")]
    pub muegge_rule_pass: YesNo,
    #[serde(rename = "QED")]
    pub qed: f64,
}

/// Everything derived from one successful descriptor calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeReport {
    pub physicochemical_properties: PhysicochemicalProperties,
    pub pharmacokinetics: Pharmacokinetics,
    pub drug_likeness: DrugLikeness,
}

/// Either a full report or a single error message, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Report(MoleculeReport),
    Failure { error: String },
}

/// The record handed back for every submitted SMILES string.
///
/// Serializes as `{"smiles": ..., "error": ...}` on failure and as
/// `{"smiles": ..., "physicochemical_properties": ..., "pharmacokinetics": ...,
/// "drug_likeness": ...}` on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub smiles: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl EvaluationResult {
    pub fn success(smiles: &str, report: MoleculeReport) -> Self {
        Self {
            smiles: smiles.to_string(),
            outcome: Outcome::Report(report),
        }
    }

    pub fn failure(smiles: &str, error: &EvaluationError) -> Self {
        Self {
            smiles: smiles.to_string(),
            outcome: Outcome::Failure { error: error.to_string() },
        }
    }

    pub fn report(&self) -> Option<&MoleculeReport> {
        match &self.outcome {
            Outcome::Report(report) => Some(report),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Report(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.report().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_smiles_has_only_two_keys() {
        let result = EvaluationResult::failure("not_a_molecule", &EvaluationError::InvalidSmiles);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"smiles":"not_a_molecule","error":"Invalid SMILES string"}"#);
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Invalid SMILES string"));
    }

    #[test]
    fn test_calculation_error_message() {
        let err = EvaluationError::Calculation("Sanitization failed".to_string());
        let result = EvaluationResult::failure("C1CC", &err);
        assert_eq!(result.error(), Some("Error during calculation: Sanitization failed"));
    }

    #[test]
    fn test_success_wire_shape() {
        let report = MoleculeReport {
            physicochemical_properties: PhysicochemicalProperties {
                molecular_weight: 46.069,
                logp: -0.0014,
                tpsa: 20.23,
                num_rings: 0,
                num_rotatable_bonds: 0,
            },
            pharmacokinetics: Pharmacokinetics {
                hia_absorption: Absorption::High,
                bbb_penetration: YesNo::Yes,
            },
            drug_likeness: DrugLikeness {
                lipinski_violations: 0,
                ghose_filter: YesNo::Yes,
                veber_rule: PassFail::Pass,
                muegge_rule_pass: YesNo::No,
                qed: 0.407,
            },
        };
        let result = EvaluationResult::success("CCO", report);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["smiles"], "CCO");
        assert!(value.get("error").is_none());
        assert_eq!(value["physicochemical_properties"]["logP"], -0.0014);
        assert_eq!(value["physicochemical_properties"]["TPSA"], 20.23);
        assert_eq!(value["pharmacokinetics"]["HIA_absorption"], "High");
        assert_eq!(value["pharmacokinetics"]["BBB_penetration"], "Yes");
        assert_eq!(value["drug_likeness"]["Lipinski_violations"], 0);
        assert_eq!(value["drug_likeness"]["Veber_rule"], "Pass");
        assert_eq!(value["drug_likeness"]["Muegge_rule_pass"], "No");
        assert_eq!(value["drug_likeness"]["QED"], 0.407);
        assert_eq!(value.as_object().unwrap().len(), 4);
    }
}
