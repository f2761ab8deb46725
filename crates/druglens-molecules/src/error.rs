use thiserror::Error;

/// The two ways turning a SMILES string into a report can fail.
///
/// The `Display` text is what ends up in the `error` field of an
/// [`EvaluationResult`](crate::report::EvaluationResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The input is not a valid molecular structure. User-correctable.
    #[error("Invalid SMILES string")]
    InvalidSmiles,

    /// Parsing succeeded (or the toolkit could not be reached) but descriptor
    /// computation faulted.
    #[error("Error during calculation: {0}")]
    Calculation(String),
}
