use dotenvy::dotenv;
use std::io;
use tally_buddy::{
    cli::{App, Presenter, Shutdown, terminal::Terminal},
    config,
    core::shop::Shop,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible). Logs go to stderr so
    //    they never interleave with the menus.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Load the four tables
    let shop = Shop::load(&app_config.data_files())
        .inspect(|_| info!("Tables loaded successfully."))
        .inspect_err(|e| error!("Failed to load tables: {}", e))?;

    // 5. Run the console
    let presenter = Presenter::from_config(&app_config)?;
    let stdin = io::stdin();
    let term = Terminal::new(stdin.lock(), io::stdout().lock());
    let mut app = App::new(term, shop, &app_config, presenter);

    match app.run()? {
        Shutdown::Requested => app_config
            .on_exit
            .run()
            .inspect_err(|e| error!("Exit action failed: {}", e))?,
        Shutdown::EndOfInput => info!("Input closed; exit action skipped."),
    }

    Ok(())
}
