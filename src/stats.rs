//! Generation statistics collection and reporting.
//!
//! Tracks how many artifacts of each kind a generation run wrote, their total
//! size, and the elapsed time.

use std::collections::BTreeMap;
use std::time::Instant;

/// Per-kind artifact tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindStats {
    pub files: u64,
    pub bytes: u64,
}

/// Generation statistics for one run.
#[derive(Debug, Clone)]
pub struct GenStats {
    start_time: Instant,
    pub classes: usize,
    pub enums: usize,
    pub param_types: usize,
    pub kinds: BTreeMap<&'static str, KindStats>,
}

impl Default for GenStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            classes: 0,
            enums: 0,
            param_types: 0,
            kinds: BTreeMap::new(),
        }
    }
}

impl GenStats {
    /// Records one written artifact.
    pub fn record(&mut self, kind: &'static str, bytes: usize) {
        let entry = self.kinds.entry(kind).or_default();
        entry.files += 1;
        entry.bytes += bytes as u64;
    }

    /// Total number of files written.
    pub fn files(&self) -> u64 {
        self.kinds.values().map(|k| k.files).sum()
    }

    /// Total number of bytes written.
    pub fn bytes(&self) -> u64 {
        self.kinds.values().map(|k| k.bytes).sum()
    }

    /// Formats a summary of the run.
    pub fn summary(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mut out = String::new();
        out.push_str("==========================================================\n");
        out.push_str("GENERATION STATISTICS\n");
        out.push_str("==========================================================\n");
        out.push_str(&format!("host_seconds             {:.4} s\n", seconds));
        out.push_str(&format!("reg.classes              {}\n", self.classes));
        out.push_str(&format!("reg.enums                {}\n", self.enums));
        out.push_str(&format!("reg.param_types          {}\n", self.param_types));
        out.push_str("----------------------------------------------------------\n");
        for (kind, k) in &self.kinds {
            out.push_str(&format!(
                "  {:<22} {} files, {} bytes\n",
                format!("out.{}", kind),
                k.files,
                k.bytes
            ));
        }
        out.push_str("----------------------------------------------------------\n");
        out.push_str(&format!(
            "out.total                {} files, {} bytes\n",
            self.files(),
            self.bytes()
        ));
        out
    }
}
