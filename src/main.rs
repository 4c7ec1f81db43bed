use clap::Parser;
use ticketkb::cli::commands::{Cli, Commands};
use ticketkb::config::Config;
use ticketkb::TicketKb;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketkb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let kb = match TicketKb::new(&config) {
        Ok(kb) => kb,
        Err(e) => {
            eprintln!("Error initializing ticketkb: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(kb, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(kb: TicketKb, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { query, category } => {
            let text = kb.search_similar_solution(&query, &category).await?;
            println!("{text}");
        }
        Commands::Embed { text } => {
            let vector = kb.embed(&text).await?;
            println!("{}", serde_json::to_string(&vector)?);
        }
        Commands::CreateIndex => {
            kb.create_index().await?;
            println!("Index created");
        }
        Commands::Populate { data, skip_create } => {
            if !skip_create {
                kb.create_index().await?;
            }
            let count = kb.populate_from_file(&data).await?;
            println!("Uploaded {count} documents");
        }
    }
    Ok(())
}
