use std::fmt::Write;
use std::time::Duration;

use pinfetch::Summary;

/// Human-readable end-of-run report.
pub fn render(summary: &Summary, elapsed: Duration) -> String {
    let failures = summary.failures();
    let mut out = String::new();

    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "- Destination: {}", summary.destination.display());
    let _ = writeln!(out, "- Attempted: {}", summary.total_attempted());
    let _ = writeln!(out, "- Downloaded: {}", summary.total_succeeded());
    let _ = writeln!(out, "- Failed: {}", failures.len());
    for failure in &failures {
        let reason = failure.error_detail.as_deref().unwrap_or("unknown error");
        let _ = writeln!(out, "    {}  ({reason})", failure.path);
    }
    let _ = writeln!(out, "- Duration: {:.2}s", elapsed.as_secs_f64());

    out
}
