use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::action::{Action, ALL_ACTIONS};
use crate::display::{payoff_table, print_error, print_report};
use crate::error::RegretResult;
use crate::payoff::{best_response, pure_payoffs, utility_of};
use crate::strategy::parse_distribution;
use crate::trainer::{validate_iterations, RegretTrainer};

const DEFAULT_OPPONENT: &str = "0.4,0.3,0.3";

#[derive(Parser)]
#[command(name = "rps", version = "1.0.0", about = "Regret-matching trainer for Rock-Paper-Scissors against a fixed opponent.")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a strategy by regret matching and print the average strategy
    Train {
        /// Opponent distribution as Rock,Paper,Scissors probabilities
        #[arg(short, long, default_value = DEFAULT_OPPONENT)]
        opponent: String,
        /// Number of training rounds
        #[arg(short, long, default_value = "1000000", allow_negative_numbers = true)]
        iterations: i64,
        /// Seed for reproducible sampling (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Expected payoff of each pure action against an opponent distribution
    Payoff {
        /// Opponent distribution as Rock,Paper,Scissors probabilities
        #[arg(short, long, default_value = DEFAULT_OPPONENT)]
        opponent: String,
    },
    /// Show the utility of each action against one opponent action
    Utility {
        /// Opponent action (rock, paper, scissors)
        action: String,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // A second init (e.g. repeated run_with_args in one process) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn dispatch(cli: Cli) {
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Train {
            opponent,
            iterations,
            seed,
            json,
        } => cmd_train(&opponent, iterations, seed, json),
        Commands::Payoff { opponent } => cmd_payoff(&opponent),
        Commands::Utility { action } => cmd_utility(&action),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn cmd_train(opponent: &str, iterations: i64, seed: Option<u64>, json: bool) -> RegretResult<()> {
    let opponent = parse_distribution(opponent)?;
    let iterations = validate_iterations(iterations)?;

    let mut trainer = match seed {
        Some(seed) => RegretTrainer::with_seed(*opponent.as_array(), seed)?,
        None => RegretTrainer::new(*opponent.as_array())?,
    };

    if !json {
        println!();
        println!(
            "  Training {} rounds against opponent [{:.3}, {:.3}, {:.3}]...",
            iterations,
            opponent[Action::Rock],
            opponent[Action::Paper],
            opponent[Action::Scissors],
        );
    }

    trainer.train(iterations);
    let report = trainer.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn cmd_payoff(opponent: &str) -> RegretResult<()> {
    let opponent = parse_distribution(opponent)?;
    let payoffs = pure_payoffs(&opponent);
    let (best, value) = best_response(&opponent);

    println!();
    println!("  {}", "Pure Action Payoffs".cyan().bold());
    println!("{}", payoff_table(&opponent, &payoffs, best));
    println!("  Best response: {} ({:+.4})", best.as_str().green().bold(), value);
    println!();
    Ok(())
}

fn cmd_utility(action: &str) -> RegretResult<()> {
    let opponent_action = Action::from_str(action)?;
    let utility = utility_of(opponent_action);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Action".bold().to_string()),
        Cell::new(format!("vs {}", opponent_action)).set_alignment(CellAlignment::Right),
    ]);
    for a in ALL_ACTIONS {
        let u = utility[a.index()];
        let label = if u > 0.0 {
            "win".green().to_string()
        } else if u < 0.0 {
            "loss".red().to_string()
        } else {
            "tie".dimmed().to_string()
        };
        table.add_row(vec![
            Cell::new(a.as_str()),
            Cell::new(format!("{:+.0} ({})", u, label)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!();
    println!("{}", table);
    println!();
    Ok(())
}
