use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::action::{Action, ALL_ACTIONS, NUM_ACTIONS};
use crate::strategy::Distribution;
use crate::trainer::TrainingReport;

pub fn probability_bar(p: f64, width: usize) -> String {
    let filled = ((p.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:5.1}%", p * 100.0);

    if p >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if p >= 0.2 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.dimmed(), pct)
    }
}

/// Table of the opponent's distribution next to the trained strategy.
pub fn strategy_table(report: &TrainingReport) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Action".bold().to_string()),
        Cell::new("Opponent").set_alignment(CellAlignment::Right),
        Cell::new("Average Strategy"),
    ]);

    for action in ALL_ACTIONS {
        let name = if action == report.best_response {
            action.as_str().green().bold().to_string()
        } else {
            action.as_str().to_string()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.3}", report.opponent.prob(action)))
                .set_alignment(CellAlignment::Right),
            Cell::new(probability_bar(report.average_strategy.prob(action), 20)),
        ]);
    }

    table.to_string()
}

/// Expected payoff of each pure action against the opponent.
pub fn payoff_table(opponent: &Distribution, payoffs: &[f64; NUM_ACTIONS], best: Action) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Action".bold().to_string()),
        Cell::new("Opponent").set_alignment(CellAlignment::Right),
        Cell::new("EV").set_alignment(CellAlignment::Right),
    ]);

    for action in ALL_ACTIONS {
        let ev = payoffs[action.index()];
        let ev_str = if ev > 0.0 {
            format!("{:+.3}", ev).green().to_string()
        } else if ev < 0.0 {
            format!("{:+.3}", ev).red().to_string()
        } else {
            format!("{:+.3}", ev)
        };
        let name = if action == best {
            action.as_str().bold().to_string()
        } else {
            action.as_str().to_string()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.3}", opponent.prob(action))).set_alignment(CellAlignment::Right),
            Cell::new(ev_str).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn print_report(report: &TrainingReport) {
    println!();
    println!(
        "  {} after {} rounds",
        "Average Strategy".cyan().bold(),
        report.iterations
    );
    println!("{}", strategy_table(report));
    println!(
        "  Expected payoff {:+.4}  |  Best response {} ({:+.4})  |  Gap {:.4}",
        report.expected_payoff,
        report.best_response.as_str().bold(),
        report.best_response_payoff,
        report.regret_gap,
    );
    println!();
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
