use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use sintegra_cli::batch::BatchReport;
use sintegra_cli::layout::{align_column, apply_table_style, header_cell};

use crate::commands::BuildOutcome;

pub fn print_summary(outcome: &BuildOutcome) {
    let report = &outcome.report;
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: not written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Register"),
        header_cell("Description"),
        header_cell("Built"),
        header_cell("Failed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (register, tally) in &report.tallies {
        let description = outcome
            .registry
            .get(register)
            .and_then(|schema| schema.description.clone())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(register).fg(Color::Blue),
            Cell::new(description),
            Cell::new(tally.built),
            count_cell(tally.failed),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(report.records.len()).add_attribute(Attribute::Bold),
        count_cell(report.failures.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_failures(report);
}

fn print_failures(report: &BatchReport) {
    if !report.has_failures() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entry"),
        header_cell("Register"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(failure.index),
            Cell::new(&failure.register),
            Cell::new(&failure.message).fg(Color::Red),
        ]);
    }
    eprintln!("{table}");
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
