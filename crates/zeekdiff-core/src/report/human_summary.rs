//! Human-readable rendering of a [`FormattedSummary`].

use crate::model::Value;
use crate::report::model::{FormattedSummary, SideSummary};

/// Render a Markdown/text summary of one category.
pub fn render_text(summary: &FormattedSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("## Category `{}`\n\n", summary.category));
    let status = if summary.identical {
        "Identical"
    } else {
        "Divergent"
    };
    out.push_str(&format!(
        "**Fields**: {}  \n**Result**: {status}\n\n",
        summary.fields.join(", ")
    ));

    out.push_str(
        "| | Source Rows | Distinct Keys | Exclusive | Digest |\n\
         |---|---|---|---|---|\n",
    );
    for (label, side) in [("cluster", &summary.cluster), ("offline", &summary.offline)] {
        out.push_str(&format!(
            "| {label} | {} | {} | {} | `{}` |\n",
            side.source_rows,
            side.projected_rows,
            side.exclusive,
            short(&side.digest)
        ));
    }
    out.push_str(&format!("\n**Shared**: {}\n", summary.shared));

    if summary.identical {
        out.push_str("\n_No differences detected._\n");
        return out;
    }

    render_side(&mut out, "Only in cluster", &summary.cluster);
    render_side(&mut out, "Only in offline", &summary.offline);
    out
}

fn render_side(out: &mut String, title: &str, side: &SideSummary) {
    if side.exclusive == 0 {
        return;
    }
    out.push_str(&format!(
        "\n### {title} ({}, showing {})\n\n",
        side.exclusive,
        side.samples.len()
    ));
    for sample in &side.samples {
        out.push_str(&format!("- `{}`\n", tuple(&sample.key)));
        if let Some(rows) = &sample.full_rows {
            if let Some(columns) = &side.source_columns {
                out.push_str(&format!("  - columns: {}\n", columns.join(", ")));
            }
            for row in rows {
                out.push_str(&format!("  - `{}`\n", joined(row)));
            }
        }
    }
}

fn tuple(row: &[Value]) -> String {
    let parts: Vec<String> = row.iter().map(Value::to_string).collect();
    format!("({})", parts.join(", "))
}

fn joined(row: &[Value]) -> String {
    let parts: Vec<String> = row.iter().map(Value::to_string).collect();
    parts.join("\t")
}

fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::Sample;

    fn side(exclusive: usize, samples: Vec<Sample>) -> SideSummary {
        SideSummary {
            source_rows: 3,
            projected_rows: 2,
            digest: "0123456789abcdef".to_string(),
            exclusive,
            source_columns: None,
            samples,
        }
    }

    #[test]
    fn test_identical_summary() {
        let summary = FormattedSummary {
            category: "dns".to_string(),
            fields: vec!["query".to_string()],
            identical: true,
            shared: 2,
            cluster: side(0, vec![]),
            offline: side(0, vec![]),
        };
        let text = render_text(&summary);
        assert!(text.contains("## Category `dns`"));
        assert!(text.contains("**Result**: Identical"));
        assert!(text.contains("`0123456789ab`"));
        assert!(text.contains("_No differences detected._"));
        assert!(!text.contains("Only in"));
    }

    #[test]
    fn test_divergent_summary_lists_samples() {
        let sample = Sample {
            key: vec![Value::text("TLSv13"), Value::Null],
            full_rows: None,
        };
        let summary = FormattedSummary {
            category: "ssl".to_string(),
            fields: vec!["version".to_string(), "server_name".to_string()],
            identical: false,
            shared: 1,
            cluster: side(0, vec![]),
            offline: side(7, vec![sample]),
        };
        let text = render_text(&summary);
        assert!(text.contains("**Result**: Divergent"));
        assert!(text.contains("### Only in offline (7, showing 1)"));
        assert!(text.contains("- `(TLSv13, -)`"));
        assert!(!text.contains("Only in cluster"));
        assert_eq!(text, summary.to_string());
    }
}
