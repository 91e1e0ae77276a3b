//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use terminal_size::{terminal_size, Width};

use crate::experiment::{Experiment, RunSummary};
use crate::parallel::DetachedReport;
use crate::registry::{registry, Suite};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80); // Cap header at 80
    let title = " IOH Benchmark Experiments ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!("║{}{}{}║", " ".repeat(padding), title, " ".repeat(right_padding));
    println!("╚{}╝", border);
    println!();
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// Print experiment info box
pub fn print_experiment_box(experiment: &Experiment, backend: &str) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let lines = [
        format!("Suite:     {}", experiment.suite),
        format!("Functions: {}", join(&experiment.fids)),
        format!("Instances: {}", join(&experiment.iids)),
        format!("Dims:      {}", join(&experiment.dims)),
        format!(
            "Runs: {}  Budget: {}  Seed: {}",
            experiment.runs, experiment.budget, experiment.seed
        ),
        format!("Backend:   {}", backend),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == lines.len() - 1 {
            println!("├{}┤", border);
        }
        println!("│ {:<width$} │", truncate(line, content_width), width = content_width);
    }
    println!("└{}┘", border);
    println!();
}

/// Aggregated runs of one `(fid, iid, dim)`
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub name: &'static str,
    pub fid: u32,
    pub iid: u32,
    pub dim: usize,
    pub runs: usize,
    /// Best value over all runs, direction-aware
    pub best: f64,
    pub mean: f64,
    pub target: Option<f64>,
    pub hits: usize,
    pub mean_evaluations: f64,
}

/// Group summaries by problem, keeping first-seen order
pub fn aggregate(summaries: &[RunSummary]) -> Vec<ResultRow> {
    let mut rows: Vec<(ResultRow, f64)> = Vec::new();

    for s in summaries {
        let maximize = s.suite == Suite::Pbo;
        let pos = rows
            .iter()
            .position(|(r, _)| r.fid == s.fid && r.iid == s.iid && r.dim == s.dim);
        let (row, evals) = match pos {
            Some(i) => &mut rows[i],
            None => {
                rows.push((
                    ResultRow {
                        name: s.name,
                        fid: s.fid,
                        iid: s.iid,
                        dim: s.dim,
                        runs: 0,
                        best: s.best_y,
                        mean: 0.0,
                        target: s.optimum,
                        hits: 0,
                        mean_evaluations: 0.0,
                    },
                    0.0,
                ));
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };

        row.runs += 1;
        row.mean += s.best_y;
        *evals += s.evaluations as f64;
        row.hits += usize::from(s.optimum_found);
        row.best = if maximize { row.best.max(s.best_y) } else { row.best.min(s.best_y) };
    }

    rows.into_iter()
        .map(|(mut row, evals)| {
            row.mean /= row.runs as f64;
            row.mean_evaluations = evals / row.runs as f64;
            row
        })
        .collect()
}

/// Print results table, one line per problem
pub fn print_results_table(summaries: &[RunSummary]) {
    let rows = aggregate(summaries);
    if rows.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 76;
    let name_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = name_col_width + 70;

    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<n_width$} {:>4} {:>6} {:>5} {:>12} {:>12} {:>12} {:>6} {:>9}",
        "Function",
        "iid",
        "dim",
        "Runs",
        "Best",
        "Mean",
        "Target",
        "Hits",
        "Evals",
        n_width = name_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for row in &rows {
        let target = row.target.map(|t| format!("{:.4e}", t)).unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<n_width$} {:>4} {:>6} {:>5} {:>12.4e} {:>12.4e} {:>12} {:>3}/{:<2} {:>9.1}",
            truncate(&format!("f{} {}", row.fid, row.name), name_col_width),
            row.iid,
            row.dim,
            row.runs,
            row.best,
            row.mean,
            target,
            row.hits,
            row.runs,
            row.mean_evaluations,
            n_width = name_col_width
        );
    }
    println!();
}

/// Print the outcome counts of a backend that does not collect results
pub fn print_detached_report(report: &DetachedReport) {
    println!(
        "  {} tasks: {} completed, {} failed, {} timed out",
        report.total(),
        report.completed,
        report.failed,
        report.timed_out
    );
    println!("  (this backend does not return results)");
    println!();
}

/// Print the list of available functions
pub fn print_available_functions(suites: &[Suite]) {
    for &suite in suites {
        println!("{} functions:", suite);
        println!();
        for entry in registry().by_suite(suite) {
            let note = if entry.requires_square { "  (dimension must be a perfect square)" } else { "" };
            println!("  {:>3}  {:<26}{}", entry.fid, entry.name, note);
        }
        println!();
    }
}
