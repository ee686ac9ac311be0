//! One generate → search run, shared by the `gridtrail` binary and tests.
//!
//! Everything a run needs travels in explicit values: [`Args`] carries the
//! command line in, [`Run`] carries the maze, the start and the search
//! result out. Nothing is kept in globals.

use std::fmt;

use clap::Parser;
use gridtrail_core::{CellState, Point};
use gridtrail_gen::{DEFAULT_OBSTACLE_PROBABILITY, GenError, Maze, MazeConfig};
use gridtrail_paths::{Search, SearchError, SearchRange, manhattan};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Generate a random maze and search it breadth-first.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "gridtrail", version)]
pub struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..))]
    pub rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..))]
    pub cols: i32,

    /// Per-cell obstacle probability in [0, 1]
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_PROBABILITY, value_parser = probability)]
    pub obstacles: f64,

    /// Seed for reproducible mazes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print every exploration frame
    #[arg(long)]
    pub frames: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The generation parameters named by these arguments.
    pub fn config(&self) -> MazeConfig {
        MazeConfig {
            rows: self.rows,
            cols: self.cols,
            obstacle_probability: self.obstacles,
            seed: self.seed,
        }
    }

    /// Log filter directive picked by `-v` flags. `None` defers to
    /// `RUST_LOG`, falling back to warnings only.
    pub fn log_directive(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

fn probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not in [0, 1]"))
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// The result of one generate → search run.
#[derive(Debug, Clone)]
pub struct Run {
    /// The maze as generated, before searching.
    pub maze: Maze,
    pub start: Point,
    pub search: Search,
    /// Size of the component reachable from `start`.
    pub reachable: usize,
}

/// Generate a maze from `config`, pick a random start and search it.
pub fn run(config: &MazeConfig) -> Result<Run, RunError> {
    config.validate()?;
    let mut mg = config.generator();
    let maze = mg.generate(config.rows, config.cols, config.obstacle_probability)?;
    let start = mg.random_start(&maze.grid)?;

    let mut grid = maze.grid.clone();
    let mut sr = SearchRange::new(grid.bounds());
    let search = sr.bfs_path(&mut grid, start, maze.target)?;
    let reachable = sr.reachable(&maze.grid, start).len();
    log::info!(
        "run: start {start}, target {}, {} frames",
        maze.target,
        search.trace.len()
    );

    Ok(Run {
        maze,
        start,
        search,
        reachable,
    })
}

impl Run {
    /// Plain-text summary of the run.
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

/// `Display` adapter for [`Run::report`].
pub struct Report<'a>(&'a Run);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run = self.0;
        let grid = &run.maze.grid;
        writeln!(
            f,
            "Maze {}x{}, {} obstacles, start {}, target {}",
            grid.rows(),
            grid.cols(),
            grid.count(CellState::Obstacle),
            run.start,
            run.maze.target
        )?;
        writeln!(f, "Explored {} cells", run.search.trace.len())?;
        match &run.search.path {
            Some(path) => {
                let cells: Vec<String> = path.positions().iter().map(Point::to_string).collect();
                writeln!(f, "Path to the target: [{}]", cells.join(", "))?;
                write!(
                    f,
                    "Number of steps: {} (straight-line minimum {})",
                    path.steps(),
                    manhattan(run.start, run.maze.target)
                )
            }
            None => write!(
                f,
                "No path to the target found! ({} cells reachable from start)",
                run.reachable
            ),
        }
    }
}

/// Anything that can stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    Gen(GenError),
    Search(SearchError),
}

impl From<GenError> for RunError {
    fn from(e: GenError) -> Self {
        Self::Gen(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gen(e) => write!(f, "generation failed: {e}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gen(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}
