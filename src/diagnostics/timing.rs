use serde::{Deserialize, Serialize};

/// Wall-clock time spent in one labelled step of a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-pass timings of a resolution run plus the overall total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}
