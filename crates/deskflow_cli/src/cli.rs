use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Deskflow workspace engine probe", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the core crate is linked
    Ping,
    /// Print the core crate version
    Version,
    /// Show the demo board grouped into workflow columns
    Board,
    /// Show KPIs, initiatives and the revenue forecast
    Dashboard,
    /// Print one demo page as JSON
    Page {
        #[arg(value_name = "PAGE_ID")]
        id: String,
    },
    /// Generate an instagram caption for a topic
    Caption {
        #[arg(value_name = "TOPIC")]
        topic: String,
    },
    /// Ask the workspace assistant
    Assist {
        #[arg(value_name = "PROMPT")]
        prompt: String,
        /// Extra workspace context passed along with the prompt
        #[arg(short = 'c', long = "context", default_value = "")]
        context: String,
    },
}
