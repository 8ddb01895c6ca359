use std::env;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use smartcar_demo::{
    config::{self, Config},
    error, server,
    smartcar::{Gateway, SmartcarClient},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true,
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    serve: ServeOptions,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the demo web server (default)
    Serve(ServeOptions),

    /// Print the Smartcar Connect authorization URL
    AuthUrl,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    pub port: Option<u16>,

    /// Open the landing page in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config(port: Option<u16>) -> Config {
    // A --port flag stands in for PORT so the default redirect URI follows it.
    let lookup = |key: &str| match (key, port) {
        ("PORT", Some(port)) => Some(port.to_string()),
        _ => env::var(key).ok(),
    };

    match Config::from_lookup(lookup) {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        None => serve(cli.serve).await,
        Some(Command::Serve(opt)) => serve(opt).await,
        Some(Command::AuthUrl) => {
            let config = load_config(None);
            match SmartcarClient::new(&config) {
                Ok(client) => println!("{}", client.authorization_url()),
                Err(e) => error!("Invalid Smartcar endpoint URL: {}", e),
            }
        }
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    let config = load_config(opt.port);
    if let Err(e) = server::start_api_server(config, opt.open).await {
        error!("Server failed: {}", e);
    }
}
