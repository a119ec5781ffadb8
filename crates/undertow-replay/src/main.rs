use std::path::PathBuf;
use std::process;

use undertow_replay::report;
use undertow_replay::runner::run_scenario;
use undertow_replay::scenarios;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut scenario_paths: Vec<PathBuf> = Vec::new();
    let mut output_path: Option<PathBuf> = None;
    let mut include_builtin = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                scenario_paths.push(PathBuf::from(required_value(&args, i, "--scenario")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(required_value(&args, i, "--output")));
            }
            "--builtin" => include_builtin = true,
            "--help" | "-h" => {
                eprintln!("Usage: undertow-replay [OPTIONS]");
                eprintln!("  --scenario <path>   Replay a RON scenario (repeatable)");
                eprintln!("  --builtin           Also replay the built-in scenarios");
                eprintln!("  --output <path>     Save results as a JSON report");
                eprintln!("Without --scenario the built-in scenarios are replayed.");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut to_run = Vec::new();
    if include_builtin || scenario_paths.is_empty() {
        to_run.extend(scenarios::builtin_scenarios());
    }
    for path in &scenario_paths {
        match scenarios::load_scenario(path) {
            Ok(scenario) => to_run.push(scenario),
            Err(e) => {
                log::error!("{e}");
                process::exit(1);
            }
        }
    }

    let results: Vec<_> = to_run.iter().map(run_scenario).collect();

    println!("\n## Underwater Replay\n");
    println!("{}", report::format_markdown(&results));
    println!("{}", report::format_failures(&results));

    let replay = report::ReplayReport {
        run: format!("replay-{}", process::id()),
        results,
    };

    if let Some(ref path) = output_path {
        if let Err(e) = report::save_report(path, &replay) {
            log::error!("{e}");
            process::exit(1);
        }
        log::info!("Saved report to {}", path.display());
    }

    if replay.failed() > 0 {
        eprintln!("ERROR: {} scenarios failed, exiting with code 1", replay.failed());
        process::exit(1);
    }

    log::info!("Replay complete.");
}

fn required_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}
