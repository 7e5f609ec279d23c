//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{AbTestReport, AssumptionResult, GroupSummary, TestProcedure};

/// Format an AbTestReport for human-readable terminal output.
///
/// Uses ANSI colors; the layout follows the order the pipeline ran in.
pub fn format_report(report: &AbTestReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str(&format!("ab-oracle: {}\n", report.metric));
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  {:<8} {:>6} {:>12} {:>12} {:>12} {:>12}\n",
        "Group", "n", "mean", "std", "median", "IQR"
    ));
    for summary in [&report.control, &report.test] {
        output.push_str(&format_summary(summary));
    }
    output.push('\n');

    output.push_str("  Assumptions:\n");
    output.push_str(&format_assumption(
        "Normality (Control)",
        &report.normality_control,
    ));
    output.push_str(&format_assumption("Normality (Test)", &report.normality_test));
    output.push_str(&format_assumption("Homogeneity", &report.homogeneity));
    output.push('\n');

    let (h0, h1) = report.hypotheses();
    output.push_str(&format!("  {}\n", h0));
    output.push_str(&format!("  {}\n\n", h1));

    let decision = &report.decision;
    output.push_str(&format!(
        "  Test: {} ({})\n",
        decision.procedure.to_string().bold(),
        decision.test_name
    ));
    output.push_str(&format!(
        "    {}\n",
        format_statistic(decision.statistic, decision.p_value)
    ));
    if let Some(df) = decision.degrees_of_freedom {
        output.push_str(&format!("    Degrees of freedom: {}\n", format_df(df)));
    }
    if let Some(method) = decision.p_value_method {
        output.push_str(&format!("    p-value method: {:?}\n", method));
    }
    output.push('\n');

    if decision.reject_null {
        output.push_str(&format!(
            "  {}\n",
            "\u{2717} H0 rejected".red().bold()
        ));
    } else {
        output.push_str(&format!(
            "  {}\n",
            "\u{2713} H0 cannot be rejected".green().bold()
        ));
    }
    output.push_str(&format!("    {}\n", report.conclusion()));

    if decision.procedure != TestProcedure::MannWhitneyU {
        let diff = report.mean_difference();
        match report.relative_lift() {
            Some(lift) => output.push_str(&format!(
                "    Mean difference (Test - Control): {:.4} ({:+.2}%)\n",
                diff,
                lift * 100.0
            )),
            None => output.push_str(&format!(
                "    Mean difference (Test - Control): {:.4}\n",
                diff
            )),
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');

    output
}

/// The `Test Stat = ..., p-value = ...` line used for every check.
pub fn format_statistic(statistic: f64, p_value: f64) -> String {
    format!("Test Stat = {:.4}, p-value = {:.4}", statistic, p_value)
}

fn format_summary(summary: &GroupSummary) -> String {
    format!(
        "  {:<8} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
        summary.group.to_string(),
        summary.count,
        summary.mean,
        summary.std,
        summary.median,
        summary.q3 - summary.q1
    )
}

fn format_assumption(label: &str, result: &AssumptionResult) -> String {
    let verdict = if result.holds {
        "holds".green().to_string()
    } else {
        "violated".yellow().to_string()
    };
    let mut line = format!(
        "    {:<20} {}  [{}]\n",
        label,
        format_statistic(result.statistic, result.p_value),
        verdict
    );
    if let Some(note) = &result.note {
        line.push_str(&format!("      note: {}\n", note.dimmed()));
    }
    line
}

fn format_df(df: f64) -> String {
    if df.fract() == 0.0 {
        format!("{:.0}", df)
    } else {
        format!("{:.2}", df)
    }
}
