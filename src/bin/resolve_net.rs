use cadastral_resolver::config::{load_config, load_network};
use cadastral_resolver::export::collect_points;
use cadastral_resolver::io::write_json_file;
use cadastral_resolver::Resolver;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut network = load_network(&config.input)?;
    let resolver = Resolver::new(config.resolver.resolve());
    let report = resolver
        .run(&mut network)
        .map_err(|e| format!("Resolution aborted: {e}"))?;
    report.print_text_summary();

    let export = collect_points(&network, &config.export_filter());
    let report_path = config.report_path();
    let points_path = config.points_path();
    write_json_file(&report_path, &report)?;
    write_json_file(&points_path, &export)?;

    println!(
        "\nWrote {} points to {} ({} not calculated)",
        export.points.len(),
        points_path.display(),
        export.not_calculated.len()
    );
    println!("Report: {}", report_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: resolve_net <config.json>".to_string()
}
