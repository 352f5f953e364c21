//! Command-line interface.

pub mod completions;
pub mod context;
pub mod delete;
pub mod export;
pub mod import;
pub mod output;
pub mod reindex;
pub mod section;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants;
use crate::core::format::Format;
use crate::error::Result;

pub use context::Context;

/// envop - Sync .env files with vault items.
#[derive(Parser)]
#[command(
    name = "envop",
    about = "Sync .env configuration with vault items and shuffle sections between them",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (default: ~/.envop.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Item store URL
    #[arg(long, global = true, env = constants::HOST_ENV)]
    pub host: Option<String>,

    /// Item store access token
    #[arg(long, global = true, env = constants::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// An item addressed by vault and title.
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Vault title (default: [defaults] vault)
    #[arg(long)]
    pub vault: Option<String>,

    /// Item title
    #[arg(long)]
    pub item: String,
}

/// Where a section comes from and where it goes.
#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Vault to read from (default: [defaults] vault)
    #[arg(long)]
    pub source_vault: Option<String>,

    /// Item to read from
    #[arg(long)]
    pub source_item: String,

    /// Section to transfer
    #[arg(long)]
    pub source_section: String,

    /// Vault to write to (default: the source vault)
    #[arg(long)]
    pub destination_vault: Option<String>,

    /// Item to write to (default: the source item)
    #[arg(long)]
    pub destination_item: Option<String>,

    /// Section to write to (default: the source section)
    #[arg(long)]
    pub destination_section: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Import an environment into an item section, creating the item if needed
    Import {
        #[command(flatten)]
        target: ItemArgs,

        /// Section to write (default: the --env name)
        #[arg(long)]
        section: Option<String>,

        /// Base environment file
        #[arg(long, default_value = constants::ENV_FILE)]
        path: PathBuf,

        /// Environment name, selects .env.<env> overlays
        #[arg(long, default_value = constants::DEFAULT_ENVIRONMENT)]
        env: String,

        /// Input format
        #[arg(long, value_enum, default_value_t = Format::Env)]
        format: Format,
    },

    /// Export an item section as an environment file
    Export {
        #[command(flatten)]
        target: ItemArgs,

        /// Section to read (default: every field of the item)
        #[arg(long)]
        section: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Env)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Copy a section to another item or section
    Cp {
        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// Move a section to another item or section
    Mv {
        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// Remove a section and its fields
    Rm {
        #[command(flatten)]
        target: ItemArgs,

        /// Section to remove
        #[arg(long)]
        section: String,
    },

    /// Regenerate every section and field id of an item
    Reindex {
        #[command(flatten)]
        target: ItemArgs,
    },

    /// List an item's sections and field names
    Show {
        #[command(flatten)]
        target: ItemArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an item
    Delete {
        #[command(flatten)]
        target: ItemArgs,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, global: GlobalArgs) -> Result<()> {
    match command {
        Command::Completions { shell } => completions::execute(shell),
        command => run(command, &Context::new(global)),
    }
}

fn run(command: Command, ctx: &Context) -> Result<()> {
    use Command::*;

    match command {
        Import {
            target,
            section,
            path,
            env,
            format,
        } => import::execute(ctx, &target, section.as_deref(), &path, &env, format),
        Export {
            target,
            section,
            format,
            out,
        } => export::execute(ctx, &target, section.as_deref(), format, out.as_deref()),
        Cp { transfer } => section::copy(ctx, &transfer),
        Mv { transfer } => section::mv(ctx, &transfer),
        Rm { target, section } => section::rm(ctx, &target, &section),
        Reindex { target } => reindex::execute(ctx, &target),
        Show { target, json } => show::execute(ctx, &target, json),
        Delete { target, yes } => delete::execute(ctx, &target, yes),
        Completions { shell } => completions::execute(shell),
    }
}
