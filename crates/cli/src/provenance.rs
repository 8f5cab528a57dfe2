//! Provenance sidecars for `areas` runs.
//!
//! Next to every JSON artifact `foo.json` the CLI writes `foo.provenance.json`
//! recording where the numbers came from (code revision, crate version,
//! input, bounding rectangle, tags) and what the run produced.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Outcome of cutting a rectangle by a sequence of half-planes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub cuts: usize,
    pub final_area: f64,
    pub final_edges: usize,
    /// 1-based step at which the region became empty, if it did.
    pub emptied_at: Option<usize>,
}

/// Everything written to a sidecar.
#[derive(Serialize)]
pub struct Sidecar<'a> {
    pub code_rev: String,
    pub crate_version: &'static str,
    pub tags: &'a [String],
    pub input: &'a str,
    pub rect: [f64; 4],
    pub summary: &'a RunSummary,
    pub output: String,
}

impl<'a> Sidecar<'a> {
    pub fn new(
        artifact: &Path,
        input: &'a str,
        rect: [f64; 4],
        summary: &'a RunSummary,
        tags: &'a [String],
    ) -> Self {
        Self {
            code_rev: code_rev(),
            crate_version: halfplane::VERSION,
            tags,
            input,
            rect,
            summary,
            output: artifact.to_string_lossy().into_owned(),
        }
    }
}

/// Write the sidecar for `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, sidecar: &Sidecar<'_>) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    ensure_parent(&path)?;
    fs::write(&path, serde_json::to_vec_pretty(sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating dir {}", dir.display())),
        _ => Ok(()),
    }
}

/// `out/areas.json` -> `out/areas.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` from the environment, else `git rev-parse HEAD`, else "unknown".
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/areas.json")),
            Path::new("/tmp/output/areas.provenance.json")
        );
        assert_eq!(sidecar_path(Path::new("areas")), Path::new("areas.provenance.json"));
    }

    #[test]
    fn sidecar_records_summary_and_tags() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("a.json");
        let summary = RunSummary {
            cuts: 3,
            final_area: 0.0,
            final_edges: 0,
            emptied_at: Some(2),
        };
        let tags = vec!["smoke".to_string()];
        let sidecar = Sidecar::new(&artifact, "cuts.csv", [0.0, 0.0, 1.0, 1.0], &summary, &tags);
        let path = write_sidecar(&artifact, &sidecar).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["output"], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["tags"][0], "smoke");
        assert_eq!(parsed["rect"][2], 1.0);
        assert_eq!(parsed["summary"]["cuts"], 3);
        assert_eq!(parsed["summary"]["emptied_at"], 2);
    }
}
