//! Labyrinth CLI binary: explore a maze session and print the run report.
//!
//! Exit status: `0` solved, `2` maze exhausted without an exit, `1` on any error.

use std::path::PathBuf;

use clap::Parser;
use cli::{logging, render_text, to_json, write_output, CliError, Finished, Overrides};
use config::MazeSettings;

#[derive(Parser, Debug)]
#[command(name = "labyrinth")]
#[command(about = "Labyrinth: explore an unknown maze one move at a time")]
struct Args {
    /// Maze id, appended to the service URL (or pass --maze)
    #[arg(value_name = "MAZE")]
    maze_arg: Option<String>,

    /// Maze id (default: LABYRINTH_MAZE)
    #[arg(long, value_name = "ID", conflicts_with = "maze_arg")]
    maze: Option<String>,

    /// Maze service WebSocket URL (default: ws://127.0.0.1:8080 or LABYRINTH_URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Seconds to wait for each move response; 0 waits forever (default: 300)
    #[arg(long, value_name = "SECS")]
    move_timeout: Option<u64>,

    /// Abort after this many moves (default: LABYRINTH_MAX_MOVES, unlimited when unset)
    #[arg(long, value_name = "N")]
    max_moves: Option<u64>,

    /// Explore the built-in demo maze instead of connecting to a server
    #[arg(long)]
    demo: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// When using --json, pretty-print (multi-line). Default: compact, one line
    #[arg(long)]
    pretty: bool,

    /// Include the discovered maze graph in the output
    #[arg(long)]
    dump_graph: bool,

    /// Write the output to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            maze: self.maze.clone().or_else(|| self.maze_arg.clone()),
            move_timeout: self.move_timeout,
            max_moves: self.max_moves,
        }
    }
}

async fn run(args: &Args) -> Result<Finished, CliError> {
    let settings = args.overrides().apply(MazeSettings::from_env()?);
    if args.demo {
        cli::run_demo(&settings).await
    } else {
        cli::run_remote(&settings).await
    }
}

fn print(args: &Args, finished: &Finished) -> Result<(), CliError> {
    let out = if args.json {
        to_json(finished, args.dump_graph, args.pretty)?
    } else {
        render_text(finished, args.dump_graph)?
    };
    write_output(&out, args.file.as_deref())?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = config::load_and_apply("labyrinth", None) {
        eprintln!("labyrinth: config: {}", e);
    }
    logging::init()?;

    let args = Args::parse();
    let finished = match run(&args).await {
        Ok(finished) => finished,
        Err(e) => {
            tracing::error!(error = %e, "exploration failed");
            eprintln!("labyrinth: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = print(&args, &finished) {
        eprintln!("labyrinth: {}", e);
        std::process::exit(1);
    }
    std::process::exit(finished.exit_code());
}
