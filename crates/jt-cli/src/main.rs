//! JetTag CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use jt_core::{EvalConfig, EvalSummary, EvaluationRecord, EventInput, InferenceEngine};
use jt_hist::{EvaluationArtifact, HistogramSink};
use jt_onnx::OrtEngine;
use jt_tagger::JetEvaluator;

mod events;

#[derive(Parser)]
#[command(name = "jettag")]
#[command(about = "JetTag - per-jet tagging inference over event files")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate jets in an event file with an ONNX model
    Evaluate {
        /// Input event file (JSON array of events)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the ONNX model file
        #[arg(short, long)]
        model: PathBuf,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum jet pT (GeV)
        #[arg(long, default_value = "20.0")]
        jet_pt_min: f64,

        /// Maximum jet |eta|
        #[arg(long, default_value = "2.4")]
        jet_eta_max: f64,

        /// Stop after this many events
        #[arg(long)]
        max_events: Option<usize>,
    },
}

/// Everything one run produces: counters plus the histogram/row artifact.
#[derive(Serialize)]
struct EvaluationReport {
    summary: EvalSummary,
    artifact: EvaluationArtifact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Evaluate { input, model, output, jet_pt_min, jet_eta_max, max_events } => {
            evaluate(input, model, output, jet_pt_min, jet_eta_max, max_events)
        }
    }
}

fn evaluate(
    input: PathBuf,
    model: PathBuf,
    output: Option<PathBuf>,
    jet_pt_min: f64,
    jet_eta_max: f64,
    max_events: Option<usize>,
) -> Result<()> {
    tracing::info!(path = %input.display(), "loading events");
    let events = events::read_events(&input)?;
    tracing::info!(events = events.len(), "events loaded");

    let engine = OrtEngine::from_file(&model)
        .with_context(|| format!("loading model {}", model.display()))?;
    let config = EvalConfig { model_path: model, jet_pt_min, jet_eta_max };

    let mut evaluator = JetEvaluator::new(config, engine);
    let mut sink = HistogramSink::new(evaluator.class_names().to_vec());
    let records = run_events(&mut evaluator, &events, &mut sink, max_events);
    tracing::info!(records = records.len(), "evaluation finished");

    let report =
        EvaluationReport { summary: evaluator.finalize(), artifact: sink.into_artifact() };
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Drive the evaluator over the event sequence in order, honoring the cap.
fn run_events<E: InferenceEngine>(
    evaluator: &mut JetEvaluator<E>,
    events: &[EventInput],
    sink: &mut HistogramSink,
    max_events: Option<usize>,
) -> Vec<EvaluationRecord> {
    let cap = max_events.unwrap_or(events.len());
    let mut records = Vec::new();
    for event in events.iter().take(cap) {
        records.extend(evaluator.process_event(event, sink));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use jt_core::{InferenceRequest, Jet};

    struct ConstEngine(Vec<f32>);

    impl InferenceEngine for ConstEngine {
        fn run(
            &self,
            _: &InferenceRequest,
            _: &[String],
        ) -> jt_core::Result<Vec<Vec<f32>>> {
            Ok(vec![self.0.clone()])
        }

        fn name(&self) -> &str {
            "Const"
        }
    }

    fn one_jet_event() -> EventInput {
        EventInput {
            jets: Some(vec![Jet { pt: 50.0, eta: 1.0, phi: 0.0, mass: 10.0 }]),
            candidates: Some(Vec::new()),
        }
    }

    #[test]
    fn max_events_caps_the_run() {
        let engine = ConstEngine(vec![0.5; jt_tagger::CLASS_NAMES.len()]);
        let mut evaluator = JetEvaluator::new(EvalConfig::default(), engine);
        let mut sink = HistogramSink::new(evaluator.class_names().to_vec());

        let events = vec![one_jet_event(), one_jet_event(), one_jet_event()];
        let records = run_events(&mut evaluator, &events, &mut sink, Some(2));

        assert_eq!(records.len(), 2);
        assert_eq!(evaluator.finalize().events, 2);
    }

    #[test]
    fn no_cap_processes_everything() {
        let engine = ConstEngine(vec![0.5; jt_tagger::CLASS_NAMES.len()]);
        let mut evaluator = JetEvaluator::new(EvalConfig::default(), engine);
        let mut sink = HistogramSink::new(evaluator.class_names().to_vec());

        let events = vec![one_jet_event(), one_jet_event()];
        let records = run_events(&mut evaluator, &events, &mut sink, None);

        assert_eq!(records.len(), 2);
        assert_eq!(sink.records().len(), 2);
    }
}
