use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::runner::ScenarioResult;
use crate::ReplayError;

/// Results of one replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub run: String,
    pub results: Vec<ScenarioResult>,
}

impl ReplayReport {
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &ReplayReport) -> Result<(), ReplayError> {
    let io_error = |source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(io_error)
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[ScenarioResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scenario | Frames | Rendered | Skipped | Inactive | Globals | Pass states | Mask first | Result |\n");
    out.push_str("|----------|--------|----------|---------|----------|---------|-------------|------------|--------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            r.name,
            r.frames.len(),
            r.rendered,
            r.skipped,
            r.inactive,
            r.globals_published,
            r.pass_states_published,
            if r.mask_before_effect { "yes" } else { "no" },
            if r.passed() { "pass" } else { "FAIL" },
        ));
    }

    out
}

/// List every expectation failure, or a one-line all-clear.
pub fn format_failures(results: &[ScenarioResult]) -> String {
    let failed: Vec<&ScenarioResult> = results.iter().filter(|r| !r.passed()).collect();
    if failed.is_empty() {
        return format!("All {} scenarios passed.\n", results.len());
    }

    let mut out = String::new();
    out.push_str(&format!("FAILED SCENARIOS ({}):\n", failed.len()));
    for r in failed {
        for failure in &r.failures {
            out.push_str(&format!("  - {}: {}\n", r.name, failure));
        }
    }
    out
}
