use ratatui::crossterm::{
    self,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
};
use std::path::PathBuf;

use crate::{
    chat::{ChatSession, Mode},
    config::{Config, TransportKind},
    error::AResult,
};

mod chat;
mod config;
mod error;
mod logging;
mod runner;
mod theme;
mod transport;
mod tui;
mod widgets;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file, defaults to ~/.config/jobchat/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chat backend base url
    #[arg(long, global = true)]
    url: Option<String>,

    #[arg(long, global = true, value_enum)]
    transport: Option<TransportKind>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat widget
    Run,
    /// Send a single message and print the reply
    Ask {
        text: String,
        #[arg(long, short, value_enum)]
        mode: Option<Mode>,
    },
    /// Write the default config file
    Init,
}

#[tokio::main]
async fn main() -> AResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let mut config = Config::load(&config_path).await?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(transport) = cli.transport {
        config.transport = transport;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            logging::init_file(&config.log_path()?, &config.log_filter)?;

            let terminal = ratatui::init();
            let result = match crossterm::execute!(
                std::io::stdout(),
                EnableMouseCapture,
                EnableBracketedPaste
            ) {
                Ok(()) => tui::run(terminal, config).await,
                Err(err) => Err(err.into()),
            };

            // restore the terminal before reporting any error
            let cleanup =
                crossterm::execute!(std::io::stdout(), DisableMouseCapture, DisableBracketedPaste);
            ratatui::restore();
            result?;
            cleanup?;
        }
        Commands::Ask { text, mode } => {
            logging::init_stderr(&config.log_filter)?;

            let transport = transport::from_config(&config)?;
            let mut session = ChatSession::new().with_mode(mode.unwrap_or(config.default_mode));
            session.toggle_open();
            session.set_draft(text);

            match runner::send_and_wait(&mut session, transport.as_ref()).await {
                Some(reply) => println!("{}", reply.text()),
                None => eprintln!("nothing to send"),
            }
        }
        Commands::Init => {
            if Config::init(&config_path).await? {
                println!("wrote {}", config_path.display());
            } else {
                println!("{} already exists", config_path.display());
            }
        }
    }

    Ok(())
}
