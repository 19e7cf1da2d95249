use axe_catalog::{cli, config, crop, error, search, templates};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Search { query, manufacturer, stamp_type, exact, or, symbols } => {
            let query = search::build_query(query, manufacturer, stamp_type, exact, or, &symbols);
            if query.is_empty() {
                println!("Ange söktext, filter eller symboler");
                return Ok(());
            }

            let client = search::SearchClient::new(&config)?;
            let results = client.search(&query).await?;
            if results.is_empty() {
                println!("Inga resultat hittades");
            } else {
                print!("{}", search::render_results(&query, &results));
            }
        }

        Commands::Templates { file } => {
            let catalog = templates::load_catalog(file.as_deref())?;
            print!("{}", templates::render_templates(&catalog));
        }

        Commands::Crop { input, x, y, width, height, output } => {
            let spec = crop::crop_spec(x, y, width, height)?;
            let output = output.unwrap_or_else(|| crop::default_output(&input));
            let rect = crop::crop_file(&input, &spec, &output)?;
            println!(
                "✔ {}x{} px at ({}, {}) -> {}",
                rect.width, rect.height, rect.x, rect.y, output.display()
            );
        }

        Commands::Config { set_base_url, set_session, show } => {
            let mut config = config;
            let changed = set_base_url.is_some() || set_session.is_some();

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
            }
            if let Some(session) = set_session {
                config.session_id = Some(session).filter(|s| !s.trim().is_empty());
            }
            if changed {
                config.save()?;
                println!("✔ Settings saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Settings:");
                println!("  base_url: {}", config.base_url());
                println!("  session: {}", if config.session_id.is_some() { "set" } else { "not set" });
                println!("  timeout: {}s", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
