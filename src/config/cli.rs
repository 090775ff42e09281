use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "backoffice-sync")]
#[command(about = "Back-office console for contact triage and inventory health")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "backoffice.toml")]
    pub config: String,

    /// Admin bearer token, overrides session.token from the config
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Contact message triage
    #[command(subcommand)]
    Contacts(ContactCommand),

    /// Inventory health overview and low stock alerts
    Inventory,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// List messages with optional search and status filter
    List {
        #[arg(long, default_value = "")]
        search: String,

        /// all, unread, read or replied
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Open a message; unread messages are marked as read
    View { id: String },

    /// Set the status of a message
    SetStatus { id: String, status: String },

    /// Mark a message as replied
    Reply { id: String },

    /// Delete a message after confirmation
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
