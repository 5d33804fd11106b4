use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use gridfit::config::Strategy;
use gridfit::problem::ProblemSet;
use std::path::Path;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid-fitting collision balancer for hinted outlines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strategy parameter file (JSON). Takes precedence over the problem set's own strategy.
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Balance every glyph's starting rows and report the result
    Balance(cmd::balance::BalanceArgs),
    /// Score the starting rows without balancing
    Evaluate(cmd::evaluate::EvaluateArgs),
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // Raw matches tell explicit flags apart from clap defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    let (input, flags, sub_name) = match &cli.command {
        Commands::Balance(args) => (&args.input, &args.strategy, "balance"),
        Commands::Evaluate(args) => (&args.input, &args.strategy, "evaluate"),
    };

    let set = ProblemSet::load_from_file(input).unwrap_or_else(|e| {
        error!("Cannot load problem set '{}': {}", input.display(), e);
        process::exit(1);
    });

    // Precedence: parameter file, then the set's embedded strategy, then flags alone.
    // Explicit flags always win over whichever base was chosen.
    let mut strategy = if let Some(path) = &cli.params {
        info!("Loading strategy from {}", path);
        if !Path::new(path).exists() {
            error!("Parameter file '{}' not found", path);
            process::exit(1);
        }
        Strategy::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        })
    } else if let Some(embedded) = &set.strategy {
        embedded.clone()
    } else {
        flags.clone()
    };

    if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
        strategy.merge_from_cli(flags, sub_matches);
    }
    if let Err(e) = strategy.validate() {
        error!("{}", e);
        process::exit(1);
    }

    let outcome = match &cli.command {
        Commands::Balance(args) => cmd::balance::run(args, &set, &strategy),
        Commands::Evaluate(args) => cmd::evaluate::run(args, &set, &strategy),
    };

    match outcome {
        Ok(0) => {}
        Ok(rejected) => {
            warn!("{} glyph(s) rejected", rejected);
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
