//! logview - Entry Point

use clap::Parser;
use logview::config::ResolvedConfig;
use logview::model::error::AppError;
use logview::state::{ControllerOptions, ViewController};
use logview::view_state::ParamKey;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// logview - query-string driven audit log viewer
#[derive(Parser, Debug)]
#[command(name = "logview")]
#[command(version)]
#[command(about = "Filter, sort and paginate audit logs through a URL query string")]
pub struct Args {
    /// Path to a JSONL record file (uses the bundled dataset if not provided)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Initial query string, e.g. "user=alice&sort=timestamp:desc"
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Set a view parameter, applied in order after --query
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(ParamKey, String)>,

    /// Remove a view parameter, applied after every --set
    #[arg(short, long = "clear", value_name = "KEY", value_parser = parse_param_key)]
    pub clear: Vec<ParamKey>,

    /// Simulated load latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_param_key(raw: &str) -> Result<ParamKey, String> {
    ParamKey::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ParamKey::ALL.iter().map(|key| key.as_str()).collect();
        format!("unknown parameter '{}' (expected one of: {})", raw, known.join(", "))
    })
}

fn parse_assignment(raw: &str) -> Result<(ParamKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    Ok((parse_param_key(key)?, value.to_string()))
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = logview::config::load_config_with_precedence(args.config.clone())?;
    let merged = logview::config::merge_config(config_file);
    let with_env = logview::config::apply_env_overrides(merged);
    Ok(logview::config::apply_cli_overrides(
        with_env,
        args.data.clone(),
        args.latency_ms.map(Duration::from_millis),
    ))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    logview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let records = logview::source::load(config.data_file.as_deref())?;
    info!(count = records.len(), "Records loaded");

    let options = ControllerOptions {
        latency: config.latency,
        stale_policy: config.stale_results,
        defaults: config.view_defaults(),
    };
    let mut controller = ViewController::new(records, options, &args.query, Instant::now());

    for (key, value) in &args.set {
        controller.set_param(*key, value, Instant::now());
    }
    if !args.clear.is_empty() {
        controller.clear_params(&args.clear, Instant::now());
    }

    while let Some(deadline) = controller.next_deadline() {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        controller.tick(Instant::now());
    }

    let snapshot = controller.snapshot();
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "?{}", snapshot.query)?;
    writeln!(stdout, "{}", logview::view::render(&snapshot))?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["logview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["logview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["logview"]);
        assert_eq!(args.data, None);
        assert_eq!(args.query, "");
        assert!(args.set.is_empty());
        assert!(args.clear.is_empty());
        assert_eq!(args.latency_ms, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_query_flag() {
        let args = Args::parse_from(["logview", "--query", "user=alice&page=2"]);
        assert_eq!(args.query, "user=alice&page=2");
    }

    #[test]
    fn test_set_is_repeatable_and_ordered() {
        let args = Args::parse_from(["logview", "--set", "user=bob", "-s", "sort=user:desc"]);
        assert_eq!(
            args.set,
            vec![
                (ParamKey::User, "bob".to_string()),
                (ParamKey::Sort, "user:desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_allows_empty_value() {
        let args = Args::parse_from(["logview", "--set", "action="]);
        assert_eq!(args.set, vec![(ParamKey::Action, String::new())]);
    }

    #[test]
    fn test_set_value_may_contain_equals() {
        let args = Args::parse_from(["logview", "--set", "user=a=b"]);
        assert_eq!(args.set, vec![(ParamKey::User, "a=b".to_string())]);
    }

    #[test]
    fn test_set_rejects_missing_equals() {
        let result = Args::try_parse_from(["logview", "--set", "user"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let result = Args::try_parse_from(["logview", "--set", "theme=dark"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_accepts_data_state() {
        let args = Args::parse_from(["logview", "--clear", "data-state", "-c", "page"]);
        assert_eq!(args.clear, vec![ParamKey::DataState, ParamKey::Page]);
    }

    #[test]
    fn test_clear_rejects_unknown_key() {
        let result = Args::try_parse_from(["logview", "--clear", "colour"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_latency_rejects_negative() {
        let result = Args::try_parse_from(["logview", "--latency-ms", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_data_and_config_paths() {
        let args = Args::parse_from([
            "logview",
            "--data",
            "audit.jsonl",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("audit.jsonl")));
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_latency_flows_through_config_precedence_chain() {
        use logview::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            latency_ms: Some(250),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.latency, Duration::from_millis(250));

        // LOGVIEW_LATENCY_MS is not set here
        let with_env = apply_env_overrides(merged);

        let with_cli = apply_cli_overrides(with_env, None, Some(Duration::ZERO));
        assert_eq!(
            with_cli.latency,
            Duration::ZERO,
            "CLI latency should override all other sources"
        );
    }

    #[test]
    fn test_default_latency_is_500ms() {
        assert_eq!(ResolvedConfig::default().latency, Duration::from_millis(500));
    }
}
