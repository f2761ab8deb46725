//! druglens-molecules: Descriptor calculation and drug-likeness evaluation.
//!
//! 1. Parsing a SMILES string and computing descriptors (RDKit, behind [`StructureEvaluator`])
//! 2. Applying the Lipinski, Ghose, Veber and Muegge rules plus rough HIA/BBB heuristics
//! 3. Assembling the [`EvaluationResult`] record returned to callers

pub mod descriptors;
pub mod error;
pub mod pipeline;
pub mod rdkit;
pub mod report;
pub mod rules;
pub mod structure;

pub use descriptors::MoleculeDescriptors;
pub use error::EvaluationError;
pub use pipeline::{DescriptorPipeline, Evaluate};
pub use rdkit::RdkitEvaluator;
pub use report::{EvaluationResult, MoleculeReport};
pub use rules::RuleEvaluator;
pub use structure::{MockStructureEvaluator, StructureEvaluator};
