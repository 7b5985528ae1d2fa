use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use pairgate::{cli, config, error};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP gateway
    Serve(ServeOptions),

    /// Issue, verify and list pairing codes
    Pair(PairOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the admin page in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PairOptions {
    #[command(subcommand)]
    pub command: PairSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PairSubcommand {
    /// Issue a pairing code for a phone number
    Issue {
        /// Phone number, at least 10 characters
        number: String,
    },

    /// Consume a pairing code
    Verify {
        /// 8-character pairing code
        code: String,
    },

    /// List stored pairing codes
    List {
        /// Only show codes that can still be verified
        #[clap(long)]
        active: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.open).await,
        Command::Pair(opt) => match opt.command {
            PairSubcommand::Issue { number } => cli::pair_issue(&number).await,
            PairSubcommand::Verify { code } => cli::pair_verify(&code).await,
            PairSubcommand::List { active } => cli::pair_list(active).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
