//! druglens-web: Web form for SMILES property calculation.
//! Provides:
//!   - A form page that evaluates a submitted SMILES string and renders the report
//!   - A JSON endpoint returning the same evaluation record

pub mod router;
pub mod handlers;
pub mod state;
