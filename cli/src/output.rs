//! Report rendering: a short human summary, or one JSON document for scripts.

use std::path::Path;

use labyrinth::{Direction, Outcome};
use serde_json::json;

use crate::Finished;

/// Human-readable summary. With `dump_graph`, the map follows as pretty JSON.
pub fn render_text(finished: &Finished, dump_graph: bool) -> Result<String, serde_json::Error> {
    let report = &finished.report;
    let summary = match report.outcome {
        Outcome::Solved => format!(
            "solved in {} moves ({} locations mapped)",
            report.moves, report.locations
        ),
        Outcome::Exhausted => format!(
            "no exit: maze exhausted after {} moves ({} locations mapped)",
            report.moves, report.locations
        ),
    };
    let mut out = format!(
        "{}\npath: {}\nstart: {}\nend: {}\n",
        summary,
        format_path(&report.path),
        report.start,
        report.end
    );
    if dump_graph {
        out.push_str(&format!(
            "graph:\n{}\n",
            serde_json::to_string_pretty(&finished.graph)?
        ));
    }
    Ok(out)
}

fn format_path(path: &[Direction]) -> String {
    if path.is_empty() {
        return "(none)".to_string();
    }
    path.iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{"report": ..}`, plus `"graph"` when `dump_graph` is set. Compact unless `pretty`.
pub fn to_json(
    finished: &Finished,
    dump_graph: bool,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let mut value = json!({ "report": finished.report });
    if dump_graph {
        value["graph"] = serde_json::to_value(&finished.graph)?;
    }
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

/// Writes `text` to `file`, or to stdout when no file is given.
pub fn write_output(text: &str, file: Option<&Path>) -> std::io::Result<()> {
    let text = if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    };
    match file {
        Some(path) => std::fs::write(path, text),
        None => {
            let mut stdout = std::io::stdout().lock();
            std::io::Write::write_all(&mut stdout, text.as_bytes())?;
            std::io::Write::flush(&mut stdout)
        }
    }
}
