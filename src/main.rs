//! nilm-augment entry point: CLI wiring and config-driven pipeline run.

use std::path::Path;
use std::process;

use nilm_augment::cli::{CliOptions, parse_args, print_usage};
use nilm_augment::config::DatasetConfig;
use nilm_augment::io::{CsvSink, CsvSource};
use nilm_augment::pipeline::Orchestrator;
use nilm_augment::reporting::LogReporter;

/// Resolves the dataset configuration: `--config` file or eval-set preset,
/// then directory overrides.
fn load_config(cli: &CliOptions) -> Result<DatasetConfig, String> {
    let mut config = if let Some(ref path) = cli.config {
        DatasetConfig::from_toml_file(Path::new(path)).map_err(|e| e.to_string())?
    } else {
        let name = cli.eval_set.as_deref().unwrap_or("hard");
        DatasetConfig::from_preset(name).map_err(|e| e.to_string())?
    };

    if let Some(ref dir) = cli.data_dir {
        config.data.root = dir.clone();
    }
    if let Some(ref dir) = cli.output_dir {
        config.output.dir = dir.clone();
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.show_help {
        print_usage();
        return;
    }

    let config = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let orchestrator = match Orchestrator::from_config(&config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let source = CsvSource::from_config(&config);
    let mut sink = CsvSink::new(&config.output.dir, &config.output.prefix);

    match orchestrator.run(cli.mode, &source, &mut sink, &mut LogReporter) {
        Ok(summary) => {
            println!("{summary}");
            eprintln!("Outputs written to {}", config.output.dir.display());
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
