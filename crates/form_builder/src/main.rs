use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};

use form_builder::{
    app::App,
    check,
    cli::{Cli, Cmd},
    config::{self, Config},
    errors, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    errors::init()?;
    config::ensure_data_and_config_dirs_exist()?;
    logging::init()?;

    match args.into_command() {
        Cmd::Run {
            load,
            tick_rate,
            frame_rate,
        } => {
            let config = Config::new()?;
            let mut app = App::new(config)
                .tick_rate(tick_rate)
                .frame_rate(frame_rate);
            if let Some(path) = load {
                let text = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("reading {}", path.display()))?;
                app.preload(text);
            }
            app.run().await?;
        }
        Cmd::Check { config, values } => {
            if !check::run(&config, values.as_deref())? {
                std::process::exit(libc::EXIT_FAILURE);
            }
        }
    }
    Ok(())
}
