//! Descriptor set produced by a structure evaluator.

use serde::{Deserialize, Serialize};

/// Everything the rule evaluator needs to know about one molecule.
///
/// All fields are always present; there is no partially computed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeDescriptors {
    /// Average molecular weight (Da)
    pub molecular_weight: f64,
    /// Crippen octanol-water partition coefficient
    #[serde(rename = "logP")]
    pub logp: f64,
    /// Topological polar surface area (Å²)
    pub tpsa: f64,
    pub num_rings: u32,
    pub num_rotatable_bonds: u32,
    pub num_h_acceptors: u32,
    pub num_h_donors: u32,
    /// Atom count as reported by the toolkit
    pub num_atoms: u32,
    /// Quantitative estimate of drug-likeness, in [0, 1]
    pub qed: f64,
}
