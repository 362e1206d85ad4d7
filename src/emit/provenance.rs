//! Build-Provenance Emitter.
//!
//! Stamps the build with the revision and commit date of the source tree.
//! The lookup is best-effort: outside a repository, without a `git`
//! executable, or on any failure of the tool, both fields are `Unknown`.

use crate::emit::cxx_string;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Placeholder for a field that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Revision id and commit date of a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Revision id of the checked-out commit.
    pub revision: String,
    /// Commit date of that revision.
    pub date: String,
}

impl Provenance {
    /// Provenance with both fields unknown.
    pub fn unknown() -> Self {
        Self {
            revision: UNKNOWN.to_string(),
            date: UNKNOWN.to_string(),
        }
    }

    /// Probes the repository rooted at `dir`. Never fails.
    pub fn probe(dir: &Path) -> Self {
        match try_probe(dir) {
            Some(p) => {
                debug!(revision = %p.revision, "provenance resolved");
                p
            }
            None => {
                warn!(dir = %dir.display(), "revision information unavailable");
                Self::unknown()
            }
        }
    }

    /// Renders the native provenance source.
    pub fn render(&self) -> String {
        format!(
            "const char *scmRev = {};\nconst char *scmDate = {};\n",
            cxx_string(&self.revision),
            cxx_string(&self.date)
        )
    }
}

fn try_probe(dir: &Path) -> Option<Provenance> {
    if !dir.join(".git").exists() {
        return None;
    }
    let git = which::which("git").ok()?;
    let query = |args: &[&str]| -> Option<String> {
        let output = Command::new(&git).arg("-C").arg(dir).args(args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    };
    Some(Provenance {
        revision: query(&["rev-parse", "HEAD"])?,
        date: query(&["log", "-1", "--format=%cd"])?,
    })
}
