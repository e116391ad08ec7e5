use std::fmt::Write;

use routelab_core::algo::complexity::ComplexityReport;

/// Renders the report as plain-text tables
pub fn render_text(report: &ComplexityReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Algorithm complexity analysis");
    let _ = writeln!(out, "=============================");

    for size in &report.sizes {
        let _ = writeln!(out, "\nRoute of {} nodes", size.size);
        let _ = writeln!(
            out,
            "  {:<24} {:>10} {:>8} {:>8} {:>10} {:>11}",
            "algorithm", "time (ms)", "nodes", "edges", "queue ops", "efficiency"
        );
        for m in &size.measurements {
            let _ = writeln!(
                out,
                "  {:<24} {:>10.3} {:>8} {:>8} {:>10} {:>10.1}%",
                m.algorithm.display_name(),
                m.execution_time,
                m.nodes_explored,
                m.edges_relaxed,
                m.priority_queue_operations,
                m.efficiency_ratio
            );
        }
        let summary = &size.summary;
        let _ = writeln!(
            out,
            "  fastest: {} ({:.1}x), most efficient: {} ({:.1}% fewer nodes)",
            summary.faster_algorithm, summary.speedup_factor, summary.more_efficient, summary.exploration_reduction
        );
    }

    if !report.scaling.is_empty() {
        let _ = writeln!(out, "\nScaling against O(n log n)");
        let _ = writeln!(out, "--------------------------");
    }
    for step in &report.scaling {
        let _ = writeln!(
            out,
            "\n{} -> {} nodes ({:.1}x larger), expected {:.2}x",
            step.from, step.to, step.size_ratio, step.expected_ratio
        );
        for scaling in &step.algorithms {
            let verdict = if scaling.within_expectation {
                "below expectation"
            } else {
                "at or above expectation"
            };
            let _ = writeln!(
                out,
                "  {:<24} time {:>6.2}x  nodes {:>6.2}x  {verdict}",
                scaling.algorithm.display_name(),
                scaling.time_ratio,
                scaling.exploration_ratio
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use routelab_core::{EngineConfig, algo::complexity::complexity_report};

    use super::*;

    #[test]
    fn text_report_lists_every_size_and_step() {
        let report = complexity_report(&[10, 20], &EngineConfig::default()).unwrap();
        let text = render_text(&report);

        assert!(text.contains("Route of 10 nodes"));
        assert!(text.contains("Route of 20 nodes"));
        assert!(text.contains("10 -> 20 nodes (2.0x larger)"));
        assert!(text.contains("Bidirectional Dijkstra"));
    }
}
