//! Terminal rendering for regression reports.
//!
//! Plain text, no timestamps: rendering the same report twice gives the
//! same bytes, so CI logs can be compared across reruns.

use crate::diff::{RegressionReport, Verdict};
use std::collections::BTreeMap;

/// Render `report` for the terminal
///
/// Quiet output lists only what got worse plus the verdict line. `noisy`
/// also lists resolved and unchanged messages and decreased counters.
pub fn render_report(report: &RegressionReport, noisy: bool) -> String {
    let mut out = String::new();

    if noisy {
        out.push_str(&render_messages("RESOLVED MESSAGES", &report.resolved));
        out.push_str(&render_messages("UNCHANGED MESSAGES", &report.unchanged));
        out.push_str(&render_counters(
            "SOME COUNTERS DECREASED",
            &report.resolved_counter_deltas,
            '-',
        ));
    }

    out.push_str(&render_messages("NEW MESSAGES", &report.new));
    out.push_str(&render_counters(
        "SOME COUNTERS INCREASED",
        &report.new_counter_deltas,
        '+',
    ));
    out.push_str(&render_verdict(report));

    out
}

fn render_messages(title: &str, messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", title);
    for msg in messages {
        out.push_str(msg);
        out.push('\n');
    }
    out
}

fn render_counters(title: &str, deltas: &BTreeMap<String, u64>, sign: char) -> String {
    if deltas.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", title);
    for (key, n) in deltas {
        out.push_str(&format!("{}  |  {:>6}\n", key, format!("{}{}", sign, n)));
    }
    out
}

fn render_verdict(report: &RegressionReport) -> String {
    match report.verdict() {
        Verdict::GoodEnough => "GOOD ENOUGH\n".to_string(),
        Verdict::Regression => format!(
            "REGRESSION DETECTED ({} new messages, {} counters increased)\n",
            report.new.len(),
            report.new_counter_deltas.len()
        ),
    }
}
