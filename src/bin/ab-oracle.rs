use std::fs::write as write_file;
use std::path::PathBuf;
use std::process;

use ab_oracle::io::{load_grouped, load_metric_column};
use ab_oracle::output::{format_report, to_json_pretty};
use ab_oracle::{HypothesisTest, LeveneCenter, MannWhitneyMethod};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Centre for Levene's test
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CenterArg {
    Mean,
    Median,
    Trimmed,
}

impl From<CenterArg> for LeveneCenter {
    fn from(center: CenterArg) -> Self {
        match center {
            CenterArg::Mean => LeveneCenter::Mean,
            CenterArg::Median => LeveneCenter::Median,
            CenterArg::Trimmed => LeveneCenter::trimmed(),
        }
    }
}

/// Mann-Whitney p-value method
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Auto,
    Exact,
    Asymptotic,
}

impl From<MethodArg> for MannWhitneyMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Auto => MannWhitneyMethod::Auto,
            MethodArg::Exact => MannWhitneyMethod::Exact,
            MethodArg::Asymptotic => MannWhitneyMethod::Asymptotic,
        }
    }
}

/// Assumption-checked A/B test on one metric.
///
/// Reads either two CSV files (one per group) or a single long-format CSV
/// with a group column, then runs normality, homogeneity and the selected
/// comparison test.
#[derive(Debug, Parser)]
#[command(name = "ab-oracle", version, about)]
struct Cli {
    /// CSV file with the Control group
    #[arg(long, requires = "test", conflicts_with = "data")]
    control: Option<PathBuf>,

    /// CSV file with the Test group
    #[arg(long, requires = "control", conflicts_with = "data")]
    test: Option<PathBuf>,

    /// Single CSV holding both groups
    #[arg(long)]
    data: Option<PathBuf>,

    /// Column holding the group label (with --data)
    #[arg(long, default_value = "Group")]
    group_column: String,

    /// Label of the Control rows (with --data)
    #[arg(long, default_value = "Control")]
    control_label: String,

    /// Label of the Test rows (with --data)
    #[arg(long, default_value = "Test")]
    test_label: String,

    /// Metric column to compare
    #[arg(short, long, env = "AB_ORACLE_METRIC", default_value = "Purchase")]
    metric: String,

    /// Significance level for every check
    #[arg(short, long, env = "AB_ORACLE_ALPHA", default_value_t = 0.05)]
    alpha: f64,

    /// Centre used by Levene's test
    #[arg(long, env = "AB_ORACLE_LEVENE_CENTER", value_enum, default_value_t = CenterArg::Median)]
    levene_center: CenterArg,

    /// Mann-Whitney p-value method
    #[arg(long, env = "AB_ORACLE_MANN_WHITNEY_METHOD", value_enum, default_value_t = MethodArg::Auto)]
    mann_whitney_method: MethodArg,

    /// Disable the Mann-Whitney continuity correction
    #[arg(long)]
    no_continuity: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long, env = "AB_ORACLE_REPORT")]
    report: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Cli::parse();

    let verbosity = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(verbosity.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let (control, test) = match (&args.control, &args.test, &args.data) {
        (Some(control), Some(test), None) => (
            load_metric_column(control, &args.metric)
                .with_context(|| format!("loading Control from {}", control.display()))?,
            load_metric_column(test, &args.metric)
                .with_context(|| format!("loading Test from {}", test.display()))?,
        ),
        (None, None, Some(data)) => load_grouped(
            data,
            &args.metric,
            &args.group_column,
            &args.control_label,
            &args.test_label,
        )
        .with_context(|| format!("loading groups from {}", data.display()))?,
        _ => bail!("pass either --control and --test, or --data"),
    };

    let pipeline = HypothesisTest::new()
        .significance_level(args.alpha)?
        .levene_center(args.levene_center.into())?
        .mann_whitney_method(args.mann_whitney_method.into())
        .continuity_correction(!args.no_continuity);

    let report = pipeline.run(&args.metric, &control, &test)?;
    info!(
        procedure = %report.procedure(),
        p_value = report.decision.p_value,
        reject_null = report.decision.reject_null,
        "decision"
    );

    if let Some(path) = &args.report {
        let json = to_json_pretty(&report)?;
        write_file(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if args.json {
        println!("{}", to_json_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}
