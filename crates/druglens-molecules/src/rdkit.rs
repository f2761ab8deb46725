//! Structure evaluation through RDKit.
//!
//! Each request runs the bundled bridge script under the configured Python
//! interpreter, writes the SMILES to its stdin and reads a single JSON reply
//! from stdout. Parsing and
//! descriptor computation happen in the same process, so the parsed
//! [`RdkitMolecule`] carries the outcome of both.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use druglens_common::RdkitConfig;

use crate::descriptors::MoleculeDescriptors;
use crate::error::EvaluationError;
use crate::structure::StructureEvaluator;

const BRIDGE_SCRIPT: &str = include_str!("../python/rdkit_descriptors.py");

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum BridgeReply {
    Ok { descriptors: MoleculeDescriptors },
    Invalid,
    Error { message: String },
}

/// A molecule RDKit accepted, with the result of its descriptor calculation.
#[derive(Debug, Clone)]
pub struct RdkitMolecule {
    descriptors: Result<MoleculeDescriptors, String>,
}

/// Wrapper for the RDKit bridge process.
#[derive(Debug, Clone)]
pub struct RdkitEvaluator {
    python: String,
    script: String,
    timeout: Duration,
}

impl RdkitEvaluator {
    pub fn new(config: &RdkitConfig) -> Self {
        Self {
            python: config.python.clone(),
            script: BRIDGE_SCRIPT.to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Replace the bridge program passed to the interpreter with `-c`.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run_bridge(&self, smiles: &str) -> Result<BridgeReply, EvaluationError> {
        debug!("Running RDKit bridge via {} ({} bytes of SMILES)", self.python, smiles.len());

        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                EvaluationError::Calculation(format!("could not start {}: {}", self.python, e))
            })?;

        // The SMILES goes over stdin so argv size limits and NUL bytes never apply.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            EvaluationError::Calculation("RDKit bridge stdin unavailable".to_string())
        })?;
        let input = smiles.as_bytes().to_vec();
        let write_input = async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        };

        let exchange = async { tokio::join!(write_input, child.wait_with_output()) };
        let (written, output) = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(results) => results,
            Err(_) => {
                warn!("RDKit bridge timed out after {:?}", self.timeout);
                return Err(EvaluationError::Calculation(format!(
                    "RDKit timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let output = output.map_err(|e| {
            EvaluationError::Calculation(format!("RDKit bridge I/O failed: {}", e))
        })?;

        // A bridge that exits without reading its input is reported by its exit status below.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(EvaluationError::Calculation(format!(
                    "could not send SMILES to RDKit bridge: {}",
                    e
                )));
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EvaluationError::Calculation(format!(
                "RDKit bridge exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_reply(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Decode the last non-empty stdout line of the bridge.
fn parse_reply(stdout: &str) -> Result<BridgeReply, EvaluationError> {
    let line = stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| EvaluationError::Calculation("RDKit bridge produced no output".to_string()))?;

    serde_json::from_str(line).map_err(|e| {
        EvaluationError::Calculation(format!("unreadable reply from RDKit bridge: {}", e))
    })
}

#[async_trait]
impl StructureEvaluator for RdkitEvaluator {
    type Molecule = RdkitMolecule;

    async fn parse(&self, smiles: &str) -> Result<Option<RdkitMolecule>, EvaluationError> {
        let molecule = match self.run_bridge(smiles).await? {
            BridgeReply::Invalid => None,
            BridgeReply::Ok { descriptors } => Some(RdkitMolecule { descriptors: Ok(descriptors) }),
            BridgeReply::Error { message } => Some(RdkitMolecule { descriptors: Err(message) }),
        };
        Ok(molecule)
    }

    async fn compute_descriptors(
        &self,
        molecule: &RdkitMolecule,
    ) -> Result<MoleculeDescriptors, EvaluationError> {
        molecule
            .descriptors
            .clone()
            .map_err(EvaluationError::Calculation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHANOL_REPLY: &str = r#"{"status": "ok", "descriptors": {"molecular_weight": 46.069, "logP": -0.0014, "tpsa": 20.23, "num_rings": 0, "num_rotatable_bonds": 0, "num_h_acceptors": 1, "num_h_donors": 1, "num_atoms": 9, "qed": 0.4068}}"#;

    #[test]
    fn test_parse_ok_reply() {
        match parse_reply(ETHANOL_REPLY).unwrap() {
            BridgeReply::Ok { descriptors } => {
                assert_eq!(descriptors.num_h_donors, 1);
                assert_eq!(descriptors.logp, -0.0014);
                assert_eq!(descriptors.num_atoms, 9);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_and_error_replies() {
        assert!(matches!(parse_reply(r#"{"status": "invalid"}"#), Ok(BridgeReply::Invalid)));
        match parse_reply("warning on stdout\n{\"status\": \"error\", \"message\": \"boom\"}\n").unwrap() {
            BridgeReply::Error { message } => assert_eq!(message, "boom"),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_calculation_error() {
        assert!(matches!(parse_reply(""), Err(EvaluationError::Calculation(_))));
        assert!(matches!(parse_reply("Traceback"), Err(EvaluationError::Calculation(_))));
        // Missing descriptor fields are rejected rather than defaulted
        assert!(matches!(
            parse_reply(r#"{"status": "ok", "descriptors": {"molecular_weight": 10.0}}"#),
            Err(EvaluationError::Calculation(_))
        ));
    }

    /// Stand-in bridge: `sh -c <script>` with the SMILES on stdin.
    #[cfg(unix)]
    fn shell_bridge(script: &str) -> RdkitEvaluator {
        RdkitEvaluator::new(&RdkitConfig { python: "sh".to_string(), timeout_secs: 5 })
            .with_script(script)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_bridge_process_roundtrip() {
        let script = format!(
            r#"if [ "$(cat)" = "CCO" ]; then echo '{}'; else echo '{{"status": "invalid"}}'; fi"#,
            ETHANOL_REPLY
        );
        let evaluator = shell_bridge(&script);

        let molecule = evaluator.parse("CCO").await.unwrap().expect("ethanol parses");
        let descriptors = evaluator.compute_descriptors(&molecule).await.unwrap();
        assert_eq!(descriptors.molecular_weight, 46.069);

        assert!(evaluator.parse("not_a_molecule").await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_long_smiles_reaches_bridge_intact() {
        let evaluator = shell_bridge(&format!(
            r#"if [ "$(wc -c | tr -d ' ')" -eq 200000 ]; then echo '{}'; else echo '{{"status": "invalid"}}'; fi"#,
            ETHANOL_REPLY
        ));
        let smiles = "C".repeat(200_000);
        let molecule = evaluator.parse(&smiles).await.unwrap().expect("all bytes delivered");
        assert!(evaluator.compute_descriptors(&molecule).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nul_byte_smiles_is_invalid_not_a_launch_failure() {
        let evaluator = shell_bridge(
            r#"if [ "$(wc -c | tr -d ' ')" -eq 3 ]; then echo '{"status": "invalid"}'; else exit 1; fi"#,
        );
        assert!(evaluator.parse("C\0C").await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_bridge_error_reply_surfaces_on_compute() {
        let evaluator = shell_bridge(r#"echo '{"status": "error", "message": "kekulize failed"}'"#);
        let molecule = evaluator.parse("c1cc").await.unwrap().expect("parsed");
        let err = evaluator.compute_descriptors(&molecule).await.unwrap_err();
        assert_eq!(err, EvaluationError::Calculation("kekulize failed".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_bridge_nonzero_exit() {
        let evaluator = shell_bridge("echo 'No module named rdkit' >&2; exit 1");
        let err = evaluator.parse("CCO").await.unwrap_err();
        match err {
            EvaluationError::Calculation(message) => assert!(message.contains("No module named rdkit")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_bridge_timeout() {
        let evaluator = shell_bridge("sleep 5").with_timeout(Duration::from_millis(200));
        let err = evaluator.parse("CCO").await.unwrap_err();
        match err {
            EvaluationError::Calculation(message) => assert!(message.contains("timed out")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_interpreter() {
        let evaluator = RdkitEvaluator::new(&RdkitConfig {
            python: "druglens-no-such-python".to_string(),
            timeout_secs: 5,
        });
        assert!(matches!(
            evaluator.parse("CCO").await,
            Err(EvaluationError::Calculation(_))
        ));
    }

    /// Requires a Python interpreter with RDKit installed. Run with:
    /// ```bash
    /// cargo test --package druglens-molecules -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_real_rdkit_aspirin() {
        let evaluator = RdkitEvaluator::new(&RdkitConfig::default());
        let molecule = evaluator
            .parse("CC(=O)OC1=CC=CC=C1C(=O)O")
            .await
            .unwrap()
            .expect("aspirin parses");
        let d = evaluator.compute_descriptors(&molecule).await.unwrap();
        println!("{:?}", d);
        assert!((d.molecular_weight - 180.16).abs() < 0.01);
        assert_eq!(d.num_rings, 1);
        assert_eq!(d.num_h_donors, 1);
        assert!(evaluator.parse("not_a_molecule").await.unwrap().is_none());
    }
}
