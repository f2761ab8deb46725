//! Shared application state for the web server.

use std::sync::Arc;
use minijinja::{context, Environment};

use druglens_common::Config;
use druglens_molecules::{DescriptorPipeline, Evaluate, EvaluationResult, RdkitEvaluator};

pub const INDEX_TEMPLATE: &str = "index.html";

/// Shared state injected into every Axum handler.
pub struct AppState {
    /// SMILES evaluator behind the form and API
    pub evaluator: Arc<dyn Evaluate>,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(evaluator: Arc<dyn Evaluate>) -> anyhow::Result<Self> {
        let mut templates = Environment::new();
        templates.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { evaluator, templates })
    }

    /// State backed by RDKit, with thresholds from the loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let pipeline = DescriptorPipeline::new(
            RdkitEvaluator::new(&config.rdkit),
            config.pharmacokinetics.clone(),
        );
        Self::new(Arc::new(pipeline))
    }

    /// Render the form page, with a result section when `results` is set.
    pub fn render_index(
        &self,
        smiles: &str,
        results: Option<&EvaluationResult>,
    ) -> Result<String, minijinja::Error> {
        self.templates
            .get_template(INDEX_TEMPLATE)?
            .render(context! { smiles => smiles, results => results })
    }
}

pub type SharedState = Arc<AppState>;
