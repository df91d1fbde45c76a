use crate::management::utils::prediction::Prediction;
use crate::management::utils::processing_error::ProcessingError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command as AsyncCommand;

/// Classifies the image behind `input_reference`.
///
/// `Ok(None)` means the model ran but produced nothing usable; the worker turns that
/// into an `InvalidResult` instead of a success.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, input_reference: &str) -> Result<Option<Prediction>, ProcessingError>;
}

/// Runs the classifier script in a child Python process, one image per call.
///
/// The script receives the image path as its only argument and prints a JSON line:
/// `{"predicted_disease": "...", "confidence": 0.87}` or `null`.
pub struct ScriptPredictor {
    python: String,
    script: PathBuf,
}

impl ScriptPredictor {
    pub fn new<T: Into<String>, U: Into<PathBuf>>(python: T, script: U) -> Self {
        Self {
            python: python.into(),
            script: script.into(),
        }
    }

    pub fn parse_output(stdout: &str) -> Result<Option<Prediction>, ProcessingError> {
        let line = stdout.lines().rev().map(str::trim).find(|line| !line.is_empty())
            .ok_or_else(|| ProcessingError::InvalidResult("Prediction output is empty".to_string()))?;
        serde_json::from_str::<Option<Prediction>>(line)
            .map_err(|err| ProcessingError::InvalidResult(format!("Invalid prediction output: {err}")))
    }
}

#[async_trait]
impl Predictor for ScriptPredictor {
    async fn predict(&self, input_reference: &str) -> Result<Option<Prediction>, ProcessingError> {
        let image_path = Path::new(input_reference);
        match fs::metadata(image_path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(ProcessingError::InputNotFound),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(ProcessingError::InputNotFound),
            Err(err) => return Err(ProcessingError::Unclassified(err.to_string())),
        }
        let output = AsyncCommand::new(&self.python)
            .arg(&self.script)
            .arg(image_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| ProcessingError::Unclassified(format!("Child process execution error: {err}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output.status.code().unwrap_or(-1);
            return Err(ProcessingError::Unclassified(format!("Process exit with code {code}: {}", stderr.trim())));
        }
        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}
