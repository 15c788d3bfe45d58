mod cli;
mod config;
mod export;
mod glossary;
mod lines;
mod store;
mod translate;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use store::Store;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut store = Store::open(cli.store.as_deref())?;

    match cli.command {
        Commands::Translate(args) => translate::run_translate(args, &mut store).await?,
        Commands::Retranslate(args) => translate::run_retranslate(args, &mut store).await?,
        Commands::Explain(args) => translate::run_explain(args, &mut store).await?,
        Commands::Key(args) => translate::run_key(args, &mut store).await?,
        Commands::List(args) => lines::commands::run_list(args, &mut store)?,
        Commands::Edit(args) => lines::commands::run_edit(args, &mut store)?,
        Commands::Delete(args) => lines::commands::run_delete(args, &mut store)?,
        Commands::Copy(args) => lines::commands::run_copy(args, &mut store)?,
        Commands::Clear(args) => lines::commands::run_clear(args, &mut store)?,
        Commands::Note(args) => lines::commands::run_note(args, &mut store)?,
        Commands::Export(args) => export::run(args, &store)?,
        Commands::Glossary(args) => glossary::commands::run(args, &mut store)?,
        Commands::Config(args) => config::commands::run(args, &mut store)?,
    }

    Ok(())
}
