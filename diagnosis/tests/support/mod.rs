#![allow(dead_code)]

use async_trait::async_trait;
use diagnosis::management::disease_lookup::DiseaseLookup;
use diagnosis::management::predictor::Predictor;
use diagnosis::management::utils::disease_details::DiseaseDetails;
use diagnosis::management::utils::prediction::Prediction;
use diagnosis::management::utils::processing_error::ProcessingError;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

pub fn leaf_blight_details() -> DiseaseDetails {
    DiseaseDetails::new("រលាកស្លឹក", "Apply copper fungicide", "Brown lesions with yellow halo", "Plant Pathology 4th ed.")
}

/// Answers by input reference:
/// `missing*` -> file not found, `none*` -> no prediction, `panic*` -> panics,
/// `unknown*` -> `UNKNOWN_CODE`, anything else -> `LEAF_BLIGHT`.
pub struct ScriptedPredictor {
    delay: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedPredictor {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Predictor for ScriptedPredictor {
    async fn predict(&self, input_reference: &str) -> Result<Option<Prediction>, ProcessingError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        self.calls.lock().unwrap().push(input_reference.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if input_reference.starts_with("missing") {
            Err(ProcessingError::InputNotFound)
        } else if input_reference.starts_with("none") {
            Ok(None)
        } else if input_reference.starts_with("panic") {
            panic!("model crashed on {input_reference}");
        } else if input_reference.starts_with("unknown") {
            Ok(Some(Prediction::new("UNKNOWN_CODE", 0.5)))
        } else {
            Ok(Some(Prediction::new("LEAF_BLIGHT", 0.87)))
        }
    }
}

/// Holds every call until the test releases a permit.
pub struct GatedPredictor {
    gate: Semaphore,
    entered: Notify,
}

impl GatedPredictor {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            entered: Notify::new(),
        }
    }

    pub fn release(&self, permits: usize) {
        self.gate.add_permits(permits);
    }

    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }
}

#[async_trait]
impl Predictor for GatedPredictor {
    async fn predict(&self, _input_reference: &str) -> Result<Option<Prediction>, ProcessingError> {
        self.entered.notify_one();
        self.gate.acquire().await.map_err(|err| ProcessingError::Unclassified(err.to_string()))?.forget();
        Ok(Some(Prediction::new("LEAF_BLIGHT", 0.87)))
    }
}

pub struct MapLookup {
    rows: HashMap<String, DiseaseDetails>,
    broken: bool,
}

impl MapLookup {
    pub fn new() -> Self {
        let mut rows = HashMap::new();
        rows.insert("LEAF_BLIGHT".to_string(), leaf_blight_details());
        Self { rows, broken: false }
    }

    pub fn broken() -> Self {
        Self { rows: HashMap::new(), broken: true }
    }
}

#[async_trait]
impl DiseaseLookup for MapLookup {
    async fn find_by_code(&self, code: &str) -> Result<Option<DiseaseDetails>, ProcessingError> {
        if self.broken {
            return Err(ProcessingError::Unclassified("database is locked".to_string()));
        }
        Ok(self.rows.get(code).cloned())
    }
}
