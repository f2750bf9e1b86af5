//! Run counters and the end-of-run summary.

/// Counts accumulated over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub sheets: usize,
    pub maps: usize,
    pub diffs: usize,
    pub issues: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub tally: Tally,
    pub write_dest: bool,
    pub fail_on_warning: bool,
}

impl RunSummary {
    /// `false` when warnings were reported and `failOnWarning` is set.
    pub fn passed(&self) -> bool {
        !(self.fail_on_warning && self.tally.issues > 0)
    }

    /// Human-readable summary. The stylesheet line is always present; the
    /// others only when their count is non-zero.
    pub fn lines(&self) -> Vec<String> {
        let Tally {
            sheets,
            maps,
            diffs,
            issues,
        } = self.tally;

        let mut lines = Vec::with_capacity(4);
        if self.write_dest {
            lines.push(format!(
                "{sheets} processed {} created.",
                plural(sheets, "stylesheet", "stylesheets")
            ));
        } else {
            lines.push(format!(
                "{sheets} {} processed, no files written.",
                plural(sheets, "stylesheet", "stylesheets")
            ));
        }
        if maps > 0 {
            lines.push(format!("{maps} {} created.", plural(maps, "sourcemap", "sourcemaps")));
        }
        if diffs > 0 {
            lines.push(format!("{diffs} {} created.", plural(diffs, "diff", "diffs")));
        }
        if issues > 0 {
            lines.push(format!("{issues} {} found.", plural(issues, "issue", "issues")));
        }
        lines
    }
}

fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
