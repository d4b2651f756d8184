mod errors;
mod report;

use {
    crate::report::Report,
    clap::{Parser, Subcommand},
    color_eyre::eyre::Result,
    dsfusion_decision::{CombinationRule, Fusion},
    errors::*,
    std::path::PathBuf,
    tracing::{error, info},
    tracing_forest::ForestLayer,
    tracing_log::LogTracer,
    tracing_subscriber::layer::SubscriberExt,
    tracing_subscriber::{EnvFilter, Registry},
};

/// dsfusion fuses partially conflicting sources of evidence and reports what they jointly support.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[clap(arg_required_else_help = true)]
struct Cli {
    /// Log levels: error, warn, info, debug, trace
    ///
    /// Default is "info".
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Log formats: forest, compact
    ///
    /// Default is "forest".
    #[arg(short = 'f', long)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// The subcommands supported by the dsfusion CLI.
#[derive(Subcommand)]
enum Command {
    /// Fuse every source in an evidence file and print a JSON report
    Fuse {
        /// Sets the evidence file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Overrides the combination rule: dempster, yager, murphy
        #[arg(short, long)]
        rule: Option<CombinationRule>,
        /// Pretty-prints the report
        #[arg(short, long)]
        pretty: bool,
    },
    /// Load and validate an evidence file without fusing it
    Check {
        /// Sets the evidence file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
}

/// An [`EnvFilter`] pattern to limit matched log events to error events.
const ERROR_FILTER: &str = "error";
/// An [`EnvFilter`] pattern to limit matched log events to warning events.
const WARN_FILTER: &str = "warn";
/// An [`EnvFilter`] pattern to limit matched log events to informational events.
const INFO_FILTER: &str = "info";
/// An [`EnvFilter`] pattern to limit matched log events to debug events.
///
/// Per-step combination events are emitted at this level. The unfiltered behavior can still be accessed by
/// specifying `debug,` with a trailing comma as the log level argument.
const DEBUG_FILTER: &str = "debug";
/// An [`EnvFilter`] pattern to limit matched log events to trace events.
const TRACE_FILTER: &str = "trace";

fn init_tracing(cli: &Cli) -> Result<()> {
    color_eyre::install()?;

    LogTracer::init()?;

    let log_level: &str = cli.log_level.as_ref().map_or("info", |ll| ll.as_str());
    let log_format: &str = cli.log_format.as_ref().map_or("forest", |lf| lf.as_str());
    let mut forest_layer = None;
    let mut compact_layer = None;
    // The report owns stdout, so logs always go to stderr.
    match log_format {
        "forest" => {
            forest_layer = Some(ForestLayer::from(
                tracing_forest::Printer::new().writer(std::io::stderr),
            ));
        }
        "compact" => {
            compact_layer = Some(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            );
        }
        _ => {
            return Err(CliArgumentError::InvalidLogFormat(log_format.to_string()).into());
        }
    }

    let subscriber = Registry::default()
        .with(forest_layer)
        .with(compact_layer)
        .with(EnvFilter::new(
            match log_level.to_ascii_lowercase().as_str() {
                "error" => ERROR_FILTER,
                "warn" => WARN_FILTER,
                "info" => INFO_FILTER,
                "debug" => DEBUG_FILTER,
                "trace" => TRACE_FILTER,
                _ => log_level,
            },
        ));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    match &cli.command.ok_or(CliArgumentError::MissingSubcommand)? {
        Command::Fuse {
            config,
            rule,
            pretty,
        } => {
            let config_root = dsfusion_config::toml::load_config(config)?;
            let rule = rule.unwrap_or(config_root.fusion.rule);
            let (frame, evidence) = config_root.evidence()?;
            info!(
                message = "fusing evidence",
                rule = %rule,
                sources = evidence.len(),
                hypotheses = frame.len(),
            );

            let fused = Fusion::new(frame, rule)
                .fuse(&evidence)
                .map_err(|error| {
                    error!(
                        message = "fusion failed",
                        rule = %rule,
                        error_message = %error,
                    );
                    error
                })?;

            let report = Report::new(&config_root, &evidence, rule, &fused)?;
            info!(
                message = "fused evidence",
                decision = report.fused.decision.hypothesis.as_str(),
                probability = report.fused.decision.probability,
                accepted = report.fused.decision.accepted,
                max_conflict = report.fused.max_conflict,
            );
            println!("{}", report.to_json(*pretty)?);
        }
        Command::Check { config } => {
            let config_root = dsfusion_config::toml::load_config(config)?;
            config_root.thresholds.uncertainty()?;
            let (frame, evidence) = config_root.evidence()?;
            for source in &evidence {
                info!(
                    message = "loaded source",
                    name = source.name.as_str(),
                    focal_elements = source.mass.len(),
                    vacuous = source.mass.is_vacuous(),
                );
            }
            info!(
                message = "evidence file is valid",
                rule = %config_root.fusion.rule,
                sources = evidence.len(),
                hypotheses = frame.len(),
            );
        }
    }

    Ok(())
}
