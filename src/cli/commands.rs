use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ticketkb", about = "Semantic solution lookup for IT tickets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the three closest known solutions within a category
    Search {
        /// Problem description
        query: String,
        /// Exact category to search in (case-sensitive)
        #[arg(long, short)]
        category: String,
    },
    /// Embed text and print the vector as JSON
    Embed {
        text: String,
    },
    /// Drop and recreate the search index schema
    CreateIndex,
    /// Embed the knowledge base and upload it to the index
    Populate {
        /// JSON array of {id, category, problem, solution}
        #[arg(long, default_value = "data/knowledge_base.json")]
        data: PathBuf,
        /// Upload into the existing index instead of recreating it
        #[arg(long)]
        skip_create: bool,
    },
}
