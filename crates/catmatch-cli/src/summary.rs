use std::collections::HashSet;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catmatch_cli::pipeline::MatchRun;
use catmatch_map::PairKind;

pub fn print_summary(run: &MatchRun, show_pairs: bool) {
    println!("Input: {}", run.input.display());
    match &run.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }
    if let Some(path) = &run.json_report {
        println!("JSON report: {}", path.display());
    }

    if show_pairs && !run.matching.pairs().is_empty() {
        print_pair_table(run);
    }

    let stats = run.matching.stats();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source labels"), Cell::new(run.source_count)]);
    table.add_row(vec![Cell::new("Target labels"), Cell::new(run.target_count)]);
    table.add_row(vec![
        Cell::new("Matched pairs"),
        count_cell(stats.matched, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched source"),
        count_cell(stats.unmatched_source, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched target"),
        count_cell(stats.unmatched_target, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Collapsed keys"),
        count_cell(stats.collapsed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Total similarity").add_attribute(Attribute::Bold),
        Cell::new(stats.total_similarity).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Elapsed: {:.2?}", run.elapsed);
}

fn print_pair_table(run: &MatchRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Value"),
        header_cell("Score"),
        header_cell("Status"),
    ]);
    apply_pair_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    let mut seen = HashSet::new();
    for pair in run.matching.pairs() {
        // Hidden from the map view: an earlier pair owns this key.
        let hidden = !seen.insert(pair.key.as_str());
        table.add_row(vec![
            label_cell(&pair.key, hidden),
            label_cell(&pair.value, hidden),
            score_cell(pair.kind),
            status_cell(pair.kind, hidden),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn apply_pair_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(text: &str, hidden: bool) -> Cell {
    if hidden {
        dim_cell(text)
    } else {
        Cell::new(text)
    }
}

fn score_cell(kind: PairKind) -> Cell {
    match kind.similarity() {
        Some(score) => Cell::new(score),
        None => dim_cell("-"),
    }
}

fn status_cell(kind: PairKind, hidden: bool) -> Cell {
    if hidden {
        return dim_cell("duplicate");
    }
    match kind {
        PairKind::Matched { .. } => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        PairKind::UnmatchedSource => Cell::new("no target").fg(Color::Yellow),
        PairKind::UnmatchedTarget => Cell::new("no source").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
