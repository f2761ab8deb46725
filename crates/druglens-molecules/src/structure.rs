//! Trait for structure parsing and descriptor calculation.
//!
//! Abstracts over the cheminformatics toolkit so the rule evaluator can be
//! driven without a real chemistry backend.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::descriptors::MoleculeDescriptors;
use crate::error::EvaluationError;

/// A toolkit that can turn SMILES into descriptors.
///
/// Implementations can use:
/// - RDKit through a bridge process ([`RdkitEvaluator`](crate::rdkit::RdkitEvaluator))
/// - Mock data (testing)
#[async_trait]
pub trait StructureEvaluator: Send + Sync {
    /// Parsed, in-memory molecule.
    type Molecule: Send + Sync;

    /// Parse a SMILES string.
    ///
    /// Returns `Ok(None)` if the text is not a valid structure, and `Err`
    /// only when the toolkit itself could not be consulted.
    async fn parse(&self, smiles: &str) -> Result<Option<Self::Molecule>, EvaluationError>;

    /// Compute the full descriptor set for a parsed molecule.
    async fn compute_descriptors(
        &self,
        molecule: &Self::Molecule,
    ) -> Result<MoleculeDescriptors, EvaluationError>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock evaluator with hardcoded descriptor sets.
///
/// SMILES strings not registered with [`with`](Self::with) or
/// [`with_failure`](Self::with_failure) are treated as unparseable.
#[derive(Debug, Clone, Default)]
pub struct MockStructureEvaluator {
    molecules: HashMap<String, MockMolecule>,
}

/// What the mock hands back from `parse`.
#[derive(Debug, Clone)]
pub enum MockMolecule {
    Descriptors(MoleculeDescriptors),
    /// Parses, but descriptor computation fails with this message
    Broken(String),
}

impl MockStructureEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parseable SMILES string and its descriptors.
    pub fn with(mut self, smiles: &str, descriptors: MoleculeDescriptors) -> Self {
        self.molecules.insert(smiles.to_string(), MockMolecule::Descriptors(descriptors));
        self
    }

    /// Register a SMILES string that parses but fails during calculation.
    pub fn with_failure(mut self, smiles: &str, message: &str) -> Self {
        self.molecules.insert(smiles.to_string(), MockMolecule::Broken(message.to_string()));
        self
    }
}

#[async_trait]
impl StructureEvaluator for MockStructureEvaluator {
    type Molecule = MockMolecule;

    async fn parse(&self, smiles: &str) -> Result<Option<MockMolecule>, EvaluationError> {
        Ok(self.molecules.get(smiles).cloned())
    }

    async fn compute_descriptors(
        &self,
        molecule: &MockMolecule,
    ) -> Result<MoleculeDescriptors, EvaluationError> {
        match molecule {
            MockMolecule::Descriptors(d) => Ok(d.clone()),
            MockMolecule::Broken(message) => Err(EvaluationError::Calculation(message.clone())),
        }
    }
}
