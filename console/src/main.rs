mod codes;
mod run;
mod taxonomy;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use codes::CodesArgs;
use run::RunArgs;
use taxonomy::TaxonomyArgs;
use utils::UtilsArgs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Generate codes, tally every scope and write the result tables.
    Run {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  RunArgs,
    },

    /// Append the generated R1..RN code columns to the input.
    Codes {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  CodesArgs,
    },

    /// Print the event-code categories.
    Taxonomy {
        #[clap(flatten)]
        args: TaxonomyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        MainMenu::Run { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Codes { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Taxonomy { args } => {
            args.run()?;
        },
    }
    Ok(())
}
