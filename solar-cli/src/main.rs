use clap::Parser;
use tracing::debug;

use solar_cli::app::App;
use solar_cli::cli::Cli;
use solar_cli::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let app = App::from_cli(&cli)?;
    debug!(command = ?cli.command, current_year = app.current_year(), "running");

    let output = app.run(&cli.command)?;
    print!("{output}");

    Ok(())
}
