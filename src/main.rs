//! Hang Timer CLI entry point

use std::process::ExitCode;

use clap::Parser;

use hang_timer::cli::{
    app::{load_merged_config, resolve_options, run_dry_run, run_session},
    args::{Cli, Commands},
    check_cmd::handle_check,
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
    EXIT_ERROR, EXIT_USAGE_ERROR,
};
use hang_timer::domain::config::AppConfig;
use hang_timer::domain::SessionLength;
use hang_timer::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // A bad --total is a usage error, unlike a bad value in the config file
    if let Some(ref total) = cli.total {
        if let Err(e) = total.parse::<SessionLength>() {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    let cli_config = AppConfig {
        total_duration: cli.total.clone(),
        sounds_dir: cli.sounds.clone(),
        audio: if cli.mute { Some(false) } else { None },
        notify: if cli.no_notify { Some(false) } else { None },
        ..Default::default()
    };

    let options = match load_merged_config(&store, cli_config)
        .await
        .and_then(|config| resolve_options(&config))
    {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Some(Commands::Check) => handle_check(&options, &presenter).await,
        _ if cli.dry_run => run_dry_run(options).await,
        _ => run_session(options).await,
    }
}
