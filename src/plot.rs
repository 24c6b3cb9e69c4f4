use anyhow::Context;
use console::style;
use std::collections::HashMap;

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::cursor::TimeCursor;
use crate::scale::{PlotFrame, Scales};
use crate::scatter::ScatterScene;

const GRID_WIDTH: usize = 96;
const GRID_HEIGHT: usize = 28;
/// Logical pixels per character cell; keeps the radius scale meaningful on a
/// coarse grid.
const PX_PER_CELL: f64 = 10.0;
const GUTTER: usize = 6;

/// Render the scatter plot as plain text: axes, gridlines, one mark per
/// commit, sized by its line count.
pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let records = crate::loader::load(&common.log).context("Failed to read commit log")?;
    let commits = process_commits(&records, common.repo_url.as_deref());

    let mut cursor = TimeCursor::new(&commits);
    if let Some(cutoff) = common.resolve_cutoff().context("Failed to parse cutoff")? {
        cursor.set_cutoff(cutoff);
    }
    let active = cursor.active(&commits);

    if active.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let frame = PlotFrame::new(
        GRID_WIDTH as f64 * PX_PER_CELL,
        GRID_HEIGHT as f64 * PX_PER_CELL,
    );
    let scales = Scales::compute(&active, frame);
    let scene = ScatterScene::render(&active, &scales);

    println!(
        "{} {}",
        style("Commits by time of day").bold(),
        style(format!("({} commits)", active.len())).dim()
    );

    let mut grid = vec![[' '; GRID_WIDTH].to_vec(); GRID_HEIGHT];
    let mut row_labels: HashMap<usize, String> = HashMap::new();

    for tick in &scene.y_ticks {
        let row = cell(tick.position);
        if row >= GRID_HEIGHT {
            continue;
        }
        for col in grid[row].iter_mut() {
            *col = '┄';
        }
        row_labels.insert(row, tick.label.clone());
    }

    // Scene order is largest-first, so later (smaller) dots overwrite.
    for dot in &scene.dots {
        let row = cell(dot.y);
        let col = cell(dot.x);
        if row < GRID_HEIGHT && col < GRID_WIDTH {
            grid[row][col] = dot_char(dot.radius);
        }
    }

    for (row, cells) in grid.iter().enumerate() {
        let label = row_labels
            .get(&row)
            .map(|l| format!("{l:>5}"))
            .unwrap_or_else(|| " ".repeat(5));
        let mut line = String::new();
        for &ch in cells {
            match ch {
                '┄' => line.push_str(&style(ch).dim().to_string()),
                ' ' => line.push(ch),
                _ => line.push_str(&style(ch).cyan().to_string()),
            }
        }
        println!("{} {line}", style(label).dim());
    }

    let mut axis = vec![' '; GUTTER + GRID_WIDTH];
    for tick in &scene.x_ticks {
        let col = GUTTER + cell(tick.position);
        for (i, ch) in tick.label.chars().enumerate() {
            if col + i < axis.len() {
                axis[col + i] = ch;
            }
        }
    }
    println!("{}", style(axis.into_iter().collect::<String>()).dim());
    println!("\n{}", style("Dot area tracks lines changed per commit").dim());

    Ok(())
}

fn cell(px: f64) -> usize {
    (px / PX_PER_CELL).round().max(0.0) as usize
}

fn dot_char(radius: f64) -> char {
    if radius < 6.0 {
        '·'
    } else if radius < 12.0 {
        '∘'
    } else if radius < 20.0 {
        'o'
    } else {
        '●'
    }
}
