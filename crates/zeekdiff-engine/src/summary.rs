//! Human-readable run summary.

use crate::commands::{CategoryOutcome, RunSummary};
use zeekdiff_core::render_text;

/// Render a Markdown/text summary of a whole run: an overview table, the
/// per-category reports, then every skipped category with its code.
pub fn render_run_text(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Run `{}`\n\n", summary.run_id));
    out.push_str(&format!(
        "**Started**: {}  \n",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(pcap) = &summary.pcap_path {
        out.push_str(&format!("**Capture**: `{}`  \n", pcap.display()));
    }
    out.push_str(&format!(
        "**Cluster logs**: `{}`  \n**Offline logs**: `{}`\n\n",
        summary.cluster_log_dir.display(),
        summary.offline_log_dir.display()
    ));

    out.push_str(
        "| Category | Status | Shared | Only Cluster | Only Offline |\n\
         |---|---|---|---|---|\n",
    );
    for outcome in &summary.outcomes {
        match outcome {
            CategoryOutcome::Compared(s) => {
                let status = if s.identical { "Identical" } else { "Divergent" };
                out.push_str(&format!(
                    "| {} | {status} | {} | {} | {} |\n",
                    s.category, s.shared, s.cluster.exclusive, s.offline.exclusive
                ));
            }
            CategoryOutcome::Skipped(skip) => {
                out.push_str(&format!(
                    "| {} | Skipped (`{}`) | - | - | - |\n",
                    skip.category, skip.code
                ));
            }
        }
    }
    out.push_str(&format!(
        "\n**Compared**: {}  \n**Divergent**: {}  \n**Skipped**: {}\n",
        summary.compared(),
        summary.divergent(),
        summary.skipped()
    ));

    for report in summary.outcomes.iter().filter_map(CategoryOutcome::summary) {
        out.push('\n');
        out.push_str(&render_text(report));
    }

    let skipped: Vec<_> = summary
        .outcomes
        .iter()
        .filter_map(CategoryOutcome::skipped)
        .collect();
    if !skipped.is_empty() {
        out.push_str("\n## Skipped Categories\n\n");
        for skip in skipped {
            out.push_str(&format!(
                "- **{}** `{}`: {}\n",
                skip.category, skip.code, skip.reason
            ));
        }
    }
    out
}
