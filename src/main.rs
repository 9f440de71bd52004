//! Main Program for Jigscramble
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;

use anyhow::Error;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jigscramble::config::{DEFAULT_OUTPUT_ROOT, DEFAULT_TILE_COUNT};
use jigscramble::{session, ConfigBuilder};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Log debug messages (overridden by RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a jigsaw using supplied image
    Create {
        /// Path to image
        image_path: PathBuf,

        /// Number of tiles
        #[arg(short = 't', long, default_value_t = DEFAULT_TILE_COUNT)]
        tiles: usize,

        /// Folder to put the output folder in
        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_ROOT)]
        output: PathBuf,

        /// Random seed
        #[arg(long)]
        seed: Option<String>,

        /// Worker threads for moving tiles
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Restore a scrambled image from its output folder
    Solve {
        /// Path to scrambled image folder
        folder_path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Create {
            image_path,
            tiles,
            output,
            seed,
            threads,
        } => {
            let config = ConfigBuilder::new()
                .tile_count(tiles)
                .output_root(output)
                .seed(seed)
                .threads(threads)
                .build();

            if let Some(n) = config.threads() {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build_global()?;
            }

            let mut random = config.random();
            let created = session::create(&image_path, &config, &mut random)?;
            println!("{}", created.layout.dir().display());
        }
        Command::Solve { folder_path } => {
            let restored = session::solve(&folder_path)?;
            println!("{}", restored.display());
        }
    }

    Ok(())
}
