// CLI interface
pub mod commands;

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "slotwatch")]
#[command(about = "A status panel for time-boxed account rentals", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Realtime database URL
    #[arg(long, env = "SLOTWATCH_DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Service whose rentals are shown
    #[arg(long, env = "SLOTWATCH_SERVICE", global = true)]
    pub service: Option<String>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List active and recently expired rentals
    Status {
        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one rental
    Show {
        /// Transaction id
        id: String,
    },

    /// Hide all expired rentals and release their account usage
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completion scripts
    ///
    /// INSTALLATION:
    ///
    /// Bash:
    ///   eval "$(slotwatch completions bash)"    # Add to ~/.bashrc
    ///
    /// Zsh:
    ///   eval "$(slotwatch completions zsh)"     # Add to ~/.zshrc
    ///
    /// Fish:
    ///   slotwatch completions fish > ~/.config/fish/completions/slotwatch.fish
    ///
    /// PowerShell:
    ///   slotwatch completions powershell | Out-String | Invoke-Expression
    ///
    /// Elvish:
    ///   eval (slotwatch completions elvish | slurp)
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Create a sample config file
    Init,
    /// Show the config file location and whether it is usable
    Path,
}

#[derive(Debug, Clone, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

pub async fn execute(args: Cli) -> Result<()> {
    let load_config = || -> Result<Config> {
        Ok(Config::load()?.with_overrides(args.database_url.clone(), args.service.clone()))
    };

    match args.command {
        Some(Commands::Status { json }) => commands::status::execute(&load_config()?, json).await,
        Some(Commands::Show { ref id }) => commands::show::execute(&load_config()?, id).await,
        Some(Commands::Clear { yes }) => commands::clear::execute(&load_config()?, yes).await,
        Some(Commands::Config { ref command }) => commands::config::execute(command.clone()),
        Some(Commands::Completions { ref shell }) => {
            commands::completions::execute(shell.clone());
            Ok(())
        }
        None => {
            // No command specified, launch TUI
            use crate::ui::App;
            let mut app = App::new(load_config()?)?;
            app.run().await
        }
    }
}
