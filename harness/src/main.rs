//! `slidewise`: solve sliding-block puzzles, N-puzzles and grid maps.
//!
//! Results go to stdout as text or JSON (`--json`). Diagnostics go to
//! stderr through `tracing`, filtered by `RUST_LOG`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slidewise_harness::logging;
use slidewise_harness::render::svg::{render_solution, SvgOptions};
use slidewise_harness::report::SolutionReport;
use slidewise_harness::runner::run_search;
use slidewise_harness::worlds::{Board, GridMap, GridPos, NPuzzle, SlidingBlockPuzzle};
use slidewise_search::policy::{ReopenPolicy, SearchPolicy};

#[derive(Parser)]
#[command(
    name = "slidewise",
    version,
    about = "Deterministic A* solver for sliding puzzles and grid maps"
)]
struct Cli {
    /// Re-expand positions when a cheaper path to them is found after expansion.
    #[arg(long, global = true)]
    reopen: bool,
    /// Print the report as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a sliding-block layout file (source rows, blank line, target rows).
    Blocks {
        /// Layout file.
        layout: PathBuf,
        /// Write an SVG walkthrough of the solution here.
        #[arg(long)]
        svg: Option<PathBuf>,
        /// SVG cell width in pixels.
        #[arg(long, default_value_t = 20)]
        cw: u32,
        /// SVG cell height in pixels.
        #[arg(long, default_value_t = 20)]
        ch: u32,
        /// SVG frames per row.
        #[arg(long, default_value_t = 5)]
        columns: usize,
        /// SVG colormap: c12, c20, spectral, puor or d3b.
        #[arg(long, default_value = "c12")]
        colormap: String,
    },
    /// Find a shortest path on a grid map ('X' cells are walls).
    Grid {
        /// Cells, row-major; line breaks are ignored.
        map: String,
        /// Cells per row.
        #[arg(long)]
        width: usize,
        /// Start cell as X,Y.
        #[arg(long, value_parser = parse_pos)]
        from: GridPos,
        /// Target cell as X,Y.
        #[arg(long, value_parser = parse_pos)]
        to: GridPos,
    },
    /// Solve an N-puzzle board ("123405786", or comma-separated for large boards).
    Npuzzle {
        /// Cells row by row, 0 for the blank.
        cells: String,
        /// Board columns.
        #[arg(long, default_value_t = 3)]
        cols: usize,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let policy = SearchPolicy {
        reopen: if cli.reopen {
            ReopenPolicy::Reopen
        } else {
            ReopenPolicy::Never
        },
        ..SearchPolicy::default()
    };
    match cli.command {
        Command::Blocks {
            layout,
            svg,
            cw,
            ch,
            columns,
            colormap,
        } => {
            let options = SvgOptions {
                columns,
                cell_width: cw,
                cell_height: ch,
                colormap,
                ..SvgOptions::default()
            };
            cmd_blocks(&layout, svg, &options, policy, cli.json)
        }
        Command::Grid {
            map,
            width,
            from,
            to,
        } => cmd_grid(&map, width, from, to, policy, cli.json),
        Command::Npuzzle { cells, cols } => cmd_npuzzle(&cells, cols, policy, cli.json),
    }
}

fn cmd_blocks(
    layout: &std::path::Path,
    svg: Option<PathBuf>,
    options: &SvgOptions,
    policy: SearchPolicy,
    json: bool,
) -> Result<()> {
    if svg.is_some() {
        options.validate().context("svg options")?;
    }
    let puzzle = SlidingBlockPuzzle::from_path(layout)
        .with_context(|| format!("load layout {}", layout.display()))?;
    let run = run_search(&puzzle, puzzle.source(), policy).context("solve sliding-block puzzle")?;
    let report = SolutionReport::new(&run).with_layout_digest(&puzzle.layout_digest());
    emit(&report, ",", json)?;

    if let Some(path) = svg {
        let moves = run.moves.as_deref().unwrap_or_default();
        let doc = render_solution(&puzzle, &puzzle.source(), moves, options).context("render svg")?;
        fs::write(&path, doc).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn cmd_grid(
    map: &str,
    width: usize,
    from: GridPos,
    to: GridPos,
    policy: SearchPolicy,
    json: bool,
) -> Result<()> {
    let grid = GridMap::parse(width, map)
        .and_then(|grid| grid.with_target(to))
        .context("parse grid map")?;
    grid.check_open(from).context("start cell")?;
    let run = run_search(&grid, from, policy).context("search grid map")?;
    emit(&SolutionReport::new(&run), "", json)
}

fn cmd_npuzzle(cells: &str, cols: usize, policy: SearchPolicy, json: bool) -> Result<()> {
    let board = Board::parse(cells).context("parse board")?;
    let puzzle = NPuzzle::for_board(cols, &board).context("board shape")?;
    let run = run_search(&puzzle, board, policy).context("solve n-puzzle")?;
    emit(&SolutionReport::new(&run), "", json)
}

fn emit(report: &SolutionReport, separator: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text(separator));
    }
    Ok(())
}

/// Parse `X,Y` into a grid position.
fn parse_pos(s: &str) -> Result<GridPos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(GridPos::new(coord(x)?, coord(y)?))
}
