//! Event-file loading.

use std::path::Path;

use anyhow::{Context, Result};
use jt_core::EventInput;

/// Read a JSON event file: an array of per-event input collections.
///
/// Events with a missing `jets` or `candidates` field deserialize with that
/// collection as `None` and are skipped by the evaluator with a warning.
pub fn read_events(path: &Path) -> Result<Vec<EventInput>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading event file {}", path.display()))?;
    let events: Vec<EventInput> = serde_json::from_str(&text)
        .with_context(|| format!("parsing event file {}", path.display()))?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use jt_core::EventInput;

    #[test]
    fn event_file_shape_parses() {
        let text = r#"[
            {
                "jets": [{"pt": 50.0, "eta": 1.0, "phi": 0.0, "mass": 10.0}],
                "candidates": [
                    {"pt": 5.0, "eta": 1.0, "phi": 0.1, "charge": 1,
                     "has_track_details": true, "lost_inner_hits": 0}
                ]
            },
            {"jets": null, "candidates": []}
        ]"#;
        let events: Vec<EventInput> = serde_json::from_str(text).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].jets.as_ref().unwrap().len(), 1);
        assert!(events[1].jets.is_none());
        assert_eq!(events[1].candidates.as_ref().unwrap().len(), 0);
    }
}
