use anyhow::Result;
use birthdaybook_core::{init_logging, CoreConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = birthdaybook_cli::Cli::parse();
    let config = CoreConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
    birthdaybook_cli::run_cli(cli, &config, &mut std::io::stdout().lock())
}
