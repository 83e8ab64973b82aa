//! Command-line interface.

use crate::config::{MAX_HISTORY_LIMIT, MAX_ITERATIONS_LIMIT, ValidationError};
use adgen_core::ImageBase64;
use adgen_graph::{HistoryRetention, LoopPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// adgen - generate an ad and refine it with a vision model
#[derive(Parser, Debug)]
#[command(name = "adgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter (overrides ADGEN_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one ad-generation session
    Run(RunArgs),
    /// Validate and show configuration
    Config,
}

/// Refinement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliMode {
    /// Accept/reject verdict plus a separate reviser
    Binary,
    /// Direct revision towards a reference ad (needs --target-image)
    Target,
    /// Direct revision with the critique history replayed, then published
    Conversational,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Company whose best ads prime the concept
    #[arg(long)]
    pub company_id: i64,

    #[arg(short, long, value_enum, default_value = "binary")]
    pub mode: CliMode,

    /// Iteration cap (default depends on the mode)
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Critiques to remember; 0 disables history
    #[arg(long)]
    pub history: Option<usize>,

    /// Reference ad image (PNG) to converge towards
    #[arg(long)]
    pub target_image: Option<PathBuf>,

    /// Publish the final ad
    #[arg(long, conflicts_with = "no_publish")]
    pub publish: bool,

    /// Do not publish, even in conversational mode
    #[arg(long)]
    pub no_publish: bool,

    /// Also generate a full-ad preview image
    #[arg(long)]
    pub full_ad_preview: bool,

    /// Publish the unrefined concept before refinement starts
    #[arg(long)]
    pub publish_initial: bool,

    /// Do not forward each render to Slack
    #[arg(long)]
    pub no_notify_renders: bool,
}

impl RunArgs {
    /// Build the loop policy for these flags.
    pub fn policy(&self, target: Option<ImageBase64>) -> Result<LoopPolicy, ValidationError> {
        let mut policy = match (self.mode, target) {
            (CliMode::Target, Some(target)) => LoopPolicy::target_match(target),
            (CliMode::Target, None) => {
                return Err(ValidationError::new("target_image", "Target mode needs a reference ad")
                    .with_suggestion("Pass --target-image <path-to-png>"));
            }
            (CliMode::Binary, target) => with_optional_target(LoopPolicy::binary_review(), target),
            (CliMode::Conversational, target) => {
                with_optional_target(LoopPolicy::conversational(), target)
            }
        };

        if let Some(max) = self.max_iterations {
            if max > MAX_ITERATIONS_LIMIT {
                return Err(ValidationError::new(
                    "max_iterations",
                    format!("{max} exceeds the limit of {MAX_ITERATIONS_LIMIT}"),
                )
                .with_suggestion(format!("Use a value between 0 and {MAX_ITERATIONS_LIMIT}")));
            }
            policy = policy.with_max_iterations(max);
        }

        match self.history {
            Some(0) => policy = policy.with_history(HistoryRetention::None),
            Some(capacity) if capacity > MAX_HISTORY_LIMIT => {
                return Err(ValidationError::new(
                    "history",
                    format!("{capacity} exceeds the limit of {MAX_HISTORY_LIMIT}"),
                )
                .with_suggestion(format!("Use a value between 0 and {MAX_HISTORY_LIMIT}")));
            }
            Some(capacity) => policy = policy.with_history(HistoryRetention::Full { capacity }),
            None => {}
        }

        if self.publish {
            policy = policy.with_publish(true);
        }
        if self.no_publish {
            policy = policy.with_publish(false);
        }
        if self.no_notify_renders {
            policy = policy.with_notify_renders(false);
        }
        Ok(policy)
    }
}

fn with_optional_target(policy: LoopPolicy, target: Option<ImageBase64>) -> LoopPolicy {
    match target {
        Some(target) => policy.with_target(target),
        None => policy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adgen_graph::CriticMode;

    fn parse(args: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Run(args) => args,
            Commands::Config => panic!("expected run"),
        }
    }

    #[test]
    fn test_binary_defaults() {
        let args = parse(&["adgen", "run", "--company-id", "42"]);
        assert_eq!(args.company_id, 42);
        assert_eq!(args.mode, CliMode::Binary);
        assert_eq!(args.policy(None).unwrap(), LoopPolicy::binary_review());
    }

    #[test]
    fn test_target_mode_requires_image() {
        let args = parse(&["adgen", "run", "--company-id", "1", "--mode", "target"]);
        let err = args.policy(None).unwrap_err();
        assert_eq!(err.field, "target_image");

        let policy = args.policy(Some(ImageBase64::new("QUJD"))).unwrap();
        assert_eq!(policy.critic_mode, CriticMode::DirectRevise);
        assert!(policy.comparison_target.is_some());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "adgen",
            "run",
            "--company-id",
            "7",
            "--mode",
            "conversational",
            "--max-iterations",
            "3",
            "--history",
            "0",
            "--no-publish",
            "--no-notify-renders",
        ]);
        let policy = args.policy(None).unwrap();
        assert_eq!(policy.max_iterations, 3);
        assert_eq!(policy.history_retention, HistoryRetention::None);
        assert!(!policy.publish_on_completion);
        assert!(!policy.notify_renders);
    }

    #[test]
    fn test_history_capacity() {
        let args = parse(&["adgen", "run", "--company-id", "7", "--history", "4", "--publish"]);
        let policy = args.policy(None).unwrap();
        assert_eq!(policy.history_retention, HistoryRetention::Full { capacity: 4 });
        assert!(policy.publish_on_completion);
    }

    #[test]
    fn test_iteration_limit() {
        let args = parse(&["adgen", "run", "--company-id", "7", "--max-iterations", "1000"]);
        assert_eq!(args.policy(None).unwrap_err().field, "max_iterations");
    }

    #[test]
    fn test_history_limit() {
        let args = parse(&["adgen", "run", "--company-id", "1", "--history", "18446744073709551615"]);
        let err = args.policy(None).unwrap_err();
        assert_eq!(err.field, "history");

        let args = parse(&["adgen", "run", "--company-id", "1", "--history", "100"]);
        assert_eq!(
            args.policy(None).unwrap().history_retention,
            HistoryRetention::Full { capacity: MAX_HISTORY_LIMIT }
        );
    }

    #[test]
    fn test_publish_initial_flag() {
        assert!(!parse(&["adgen", "run", "--company-id", "1"]).publish_initial);
        assert!(parse(&["adgen", "run", "--company-id", "1", "--publish-initial"]).publish_initial);
    }

    #[test]
    fn test_publish_flags_conflict() {
        let result =
            Cli::try_parse_from(["adgen", "run", "--company-id", "7", "--publish", "--no-publish"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from(["adgen", "config", "--log-level", "debug"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
