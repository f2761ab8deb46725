//! SMILES in, evaluation record out.
//!
//! Two stages joined by [`MoleculeDescriptors`]: the structure evaluator
//! parses and computes descriptors, then the [`RuleEvaluator`] applies the
//! drug-likeness rules. Every failure is folded into the returned record.

use async_trait::async_trait;
use tracing::{debug, warn};

use druglens_common::PharmacokineticPolicy;

use crate::error::EvaluationError;
use crate::report::{EvaluationResult, MoleculeReport};
use crate::rules::RuleEvaluator;
use crate::structure::StructureEvaluator;

/// The operation exposed to presentation layers.
#[async_trait]
pub trait Evaluate: Send + Sync {
    async fn evaluate(&self, smiles: &str) -> EvaluationResult;
}

pub struct DescriptorPipeline<E> {
    structures: E,
    rules: RuleEvaluator,
}

impl<E: StructureEvaluator> DescriptorPipeline<E> {
    pub fn new(structures: E, policy: PharmacokineticPolicy) -> Self {
        Self {
            structures,
            rules: RuleEvaluator::new(policy),
        }
    }

    /// Parse, compute and evaluate, stopping at the first failure.
    pub async fn run(&self, smiles: &str) -> Result<MoleculeReport, EvaluationError> {
        let molecule = self
            .structures
            .parse(smiles)
            .await?
            .ok_or(EvaluationError::InvalidSmiles)?;
        let descriptors = self.structures.compute_descriptors(&molecule).await?;
        Ok(self.rules.evaluate(&descriptors))
    }
}

#[async_trait]
impl<E: StructureEvaluator> Evaluate for DescriptorPipeline<E> {
    async fn evaluate(&self, smiles: &str) -> EvaluationResult {
        match self.run(smiles).await {
            Ok(report) => EvaluationResult::success(smiles, report),
            Err(err) => {
                match &err {
                    EvaluationError::InvalidSmiles => debug!("Rejected invalid SMILES {:?}", smiles),
                    EvaluationError::Calculation(message) => {
                        warn!("Descriptor calculation failed for {:?}: {}", smiles, message)
                    }
                }
                EvaluationResult::failure(smiles, &err)
            }
        }
    }
}
