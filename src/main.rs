use std::{sync::Arc, time::Duration};

use clap::Parser;
use tracing::{error, info, Level};

use lawallet_graph::{
    cli::{run_fetch, run_summary, Cli, Commands},
    configuration::{get_configuration, set_configuration, AppState, Config, State},
    error::Error,
    handler::live_poller::LivePoller,
    provider::{Fixture, RelayPool},
    server,
    types::Filter,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level({
            #[cfg(debug_assertions)]
            {
                Level::DEBUG
            }

            #[cfg(not(debug_assertions))]
            {
                Level::INFO
            }
        })
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = match init(&cli.env) {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await,
        Some(Commands::Fetch) => run_fetch(&config).await,
        Some(Commands::Summary { r#type, range }) => {
            run_summary(&config, &r#type, &range)
        },
    }
}

fn init(path: &str) -> Result<Config, Error> {
    set_configuration(path)?;
    get_configuration()
}

async fn serve(config: Config) -> Result<(), Error> {
    let source = Arc::new(RelayPool::new(&config)?);
    let fixture = Fixture::load(&config.fixture_path)?;

    let state = State::new(config.clone(), source, fixture);
    let app_state = AppState::new(state);

    let poller = if config.enable_live {
        Some(LivePoller::spawn(
            app_state.source.clone(),
            Filter::transactions(&config),
            Duration::from_secs(config.live_poll_interval),
            app_state.live.clone(),
        ))
    } else {
        info!("Live poller disabled");
        None
    };

    let result = tokio::select! {
        result = server::server_task(&app_state) => result,
        signal = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            signal.map_err(Error::from)
        },
    };

    if let Some(poller) = poller {
        poller.stop().await?;
    }

    result
}
