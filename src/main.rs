use clap::Parser;
use kite::cli::commands::run_browser;
use kite::cli::config::{Cli, load_config, resolve_options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(cli.config.as_deref());
    let options = resolve_options(&cli, &config);
    run_browser(options)
}
