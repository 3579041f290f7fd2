use std::env;
use std::path::PathBuf;

use crate::pipeline::mode::Mode;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub mode: Mode,
    /// Built-in eval set (`hard` or `simple`); `None` when `--config` is used.
    pub eval_set: Option<String>,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub show_help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    parse_options(&args)
}

/// `--<mode>` in dashed or underscore form.
fn mode_flag(arg: &str) -> Option<Mode> {
    arg.strip_prefix("--")?.parse().ok()
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut mode: Option<Mode> = None;
    let mut eval_set = None;
    let mut config = None;
    let mut data_dir = None;
    let mut output_dir = None;
    let mut show_help = false;

    while i < args.len() {
        let arg = args[i].as_str();
        if let Some(m) = mode_flag(arg) {
            if let Some(prev) = mode.replace(m) {
                if prev != m {
                    return Err(format!(
                        "mode flags `--{}` and `--{}` are mutually exclusive; choose one",
                        prev.name().replace('_', "-"),
                        m.name().replace('_', "-")
                    ));
                }
            }
            i += 1;
            continue;
        }
        match arg {
            "--eval-set" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --eval-set (expected `hard` or `simple`)",
                )?;
                if eval_set.replace(name.to_string()).is_some() {
                    return Err("--eval-set provided more than once".to_string());
                }
            }
            "--simple-eval" | "--simple_eval" => {
                if eval_set.replace("simple".to_string()).is_some() {
                    return Err("--eval-set provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--data-dir" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --data-dir (expected a path)")?;
                if data_dir.replace(PathBuf::from(path)).is_some() {
                    return Err("--data-dir provided more than once".to_string());
                }
            }
            "--output-dir" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --output-dir (expected a path)")?;
                if output_dir.replace(PathBuf::from(path)).is_some() {
                    return Err("--output-dir provided more than once".to_string());
                }
            }
            "--help" | "-h" => show_help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if config.is_some() && eval_set.is_some() {
        return Err(
            "arguments `--config` and `--eval-set` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if config.is_none() && eval_set.is_none() {
        eval_set = Some("hard".to_string());
    }

    Ok(CliOptions {
        mode: mode.unwrap_or_default(),
        eval_set,
        config,
        data_dir,
        output_dir,
        show_help,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("nilm-augment: build per-appliance training sets from house recordings");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  nilm-augment [--default | --random-assign | --synthetic-modelling | --merged]"
    );
    eprintln!("               [--eval-set <hard|simple> | --config <path>]");
    eprintln!("               [--data-dir <path>] [--output-dir <path>]");
    eprintln!();
    eprintln!("Modes (mutually exclusive, default: --default):");
    eprintln!("  --default               Aggregate every house once");
    eprintln!("  --random-assign         Repeat houses by their repeat factors");
    eprintln!("  --synthetic-modelling   Aggregate once, then append synthetic data");
    eprintln!("  --merged                Repeat by factors, then append synthetic data");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --eval-set <name>       Built-in house set: hard (3 houses) or simple (5)");
    eprintln!("  --config <path>         Load the dataset layout from a TOML file");
    eprintln!("  --data-dir <path>       Override the input data root");
    eprintln!("  --output-dir <path>     Override the output directory");
    eprintln!("  --help                  Show this help message");
}
