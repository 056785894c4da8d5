//! # jt-onnx
//!
//! ONNX Runtime implementation of the JetTag `InferenceEngine` trait.
//!
//! The model file is loaded once at construction; every call builds named
//! input tensors from the request's flat buffers and shapes, runs the
//! session, and extracts the requested outputs as flat `f32` vectors. All
//! runtime faults surface as `Error::Inference`, which the orchestrator in
//! jt-tagger converts into the sentinel score vector.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ort::session::{Session, SessionInputValue, SessionInputs};
use ort::value::Value;

use jt_core::{Error, InferenceEngine, InferenceRequest, Result};

/// ONNX Runtime session wrapper.
///
/// The session sits behind a mutex because the runtime requires exclusive
/// access during a call; the pipeline is single-threaded, so the lock is
/// uncontended.
pub struct OrtEngine {
    session: Mutex<Session>,
    model_path: PathBuf,
}

impl OrtEngine {
    /// Load an ONNX model from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let session = Session::builder()
            .map_err(|e| Error::Inference(format!("failed to create session builder: {e}")))?
            .commit_from_file(path)
            .map_err(|e| {
                Error::Inference(format!("failed to load model '{}': {e}", path.display()))
            })?;
        tracing::info!(model = %path.display(), "loaded ONNX model");
        Ok(Self { session: Mutex::new(session), model_path: path.to_path_buf() })
    }

    /// Path of the loaded model file.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl InferenceEngine for OrtEngine {
    fn run(&self, request: &InferenceRequest, output_names: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut inputs: Vec<(Cow<'_, str>, SessionInputValue<'_>)> =
            Vec::with_capacity(request.len());
        for ((name, shape), data) in request.names.iter().zip(&request.shapes).zip(&request.data)
        {
            let value = Value::from_array((shape.as_slice(), data.clone())).map_err(|e| {
                Error::Inference(format!("failed to build input tensor '{name}': {e}"))
            })?;
            inputs.push((Cow::Owned(name.clone()), SessionInputValue::from(value)));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Inference("session lock poisoned".to_string()))?;
        let outputs = session
            .run(SessionInputs::<0>::ValueMap(inputs))
            .map_err(|e| Error::Inference(format!("model run failed: {e}")))?;

        let mut extracted = Vec::with_capacity(output_names.len());
        for name in output_names {
            let value = outputs.get(name.as_str()).ok_or_else(|| {
                Error::OutputMismatch(format!("model produced no output named '{name}'"))
            })?;
            let (_shape, data) = value.try_extract_tensor::<f32>().map_err(|e| {
                Error::OutputMismatch(format!("output '{name}' is not an f32 tensor: {e}"))
            })?;
            extracted.push(data.to_vec());
        }
        Ok(extracted)
    }

    fn name(&self) -> &str {
        "ONNXRuntime"
    }
}
