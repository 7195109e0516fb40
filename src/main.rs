use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use block_patcher::commands::{self, Status};
use block_patcher::patch::{BlockEnd, ConditionalPatcher, ConditionalRule, MarkerRule, presets};
use block_patcher::utils::dir_scan::FileFilter;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "block-patcher")]
#[command(about = "Rewrite method blocks across a directory of source files")]
#[command(version)]
struct Cli {
    /// Logging level written to stderr
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Only patch files whose name ends with this suffix
    #[arg(long, default_value = block_patcher::patch::DEFAULT_SUFFIX)]
    suffix: String,
    /// File name to skip. Repeat for multiple.
    #[arg(long)]
    exclude: Vec<String>,
}

impl FilterArgs {
    fn into_filter(self) -> FileFilter {
        FileFilter {
            suffix: self.suffix,
            exclude: self.exclude,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the block opened by a marker line
    Marker {
        /// Directory containing the files to patch
        dir: PathBuf,
        /// Text identifying the method's opening line
        #[arg(long)]
        marker: String,
        /// File holding the replacement block
        #[arg(long)]
        replacement: PathBuf,
        /// End the block where brace depth returns to zero instead of at the first lone `}` line
        #[arg(long)]
        balanced: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Insert a method before an anchor, or replace it if already present
    Conditional {
        /// Directory containing the files to patch
        dir: PathBuf,
        /// Text whose presence means the method already exists
        #[arg(long)]
        signature: String,
        /// Text to insert before when the method is missing. Repeat in order of preference.
        #[arg(long = "anchor")]
        anchors: Vec<String>,
        /// Regular expression spanning the existing method
        #[arg(long)]
        pattern: String,
        /// File holding the replacement block
        #[arg(long)]
        replacement: PathBuf,
        /// Name of the method for status lines
        #[arg(long)]
        label: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Run a JSON recipe
    Run {
        /// Recipe file
        recipe: PathBuf,
        /// Directory to patch, overriding the recipe's
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Run a built-in recipe
    Preset {
        /// Preset name (see `presets`)
        name: String,
        /// Directory containing the files to patch
        dir: PathBuf,
    },
    /// List built-in recipes, or print one as JSON
    Presets {
        /// Preset to print
        name: Option<String>,
    },
}

fn print_status(status: &Status) {
    println!("{}", status);
}

/// Trailing newlines are dropped; the patchers add their own line break.
fn read_replacement(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text.trim_end_matches(['\r', '\n']).to_string(),
        Err(e) => {
            eprintln!("Error: failed to read replacement '{}': {}", path.display(), e);
            process::exit(2);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Marker { dir, marker, replacement, balanced, filter } => {
            let block_end = if balanced { BlockEnd::Balanced } else { BlockEnd::LoneBrace };
            let rule = MarkerRule::new(marker, read_replacement(&replacement))
                .with_block_end(block_end);
            commands::marker_apply::run(&dir, &filter.into_filter(), &rule, Some(print_status))
        }
        Commands::Conditional {
            dir,
            signature,
            anchors,
            pattern,
            replacement,
            label,
            filter,
        } => {
            let rule = ConditionalRule {
                signature,
                anchors,
                pattern,
                replacement: read_replacement(&replacement),
                label,
            };
            let filter = filter.into_filter();
            ConditionalPatcher::new(rule).and_then(|patcher| {
                commands::conditional_apply::run(&dir, &filter, &patcher, Some(print_status))
            })
        }
        Commands::Run { recipe, dir } => {
            commands::recipe_run::run(&recipe, dir.as_deref(), Some(print_status))
        }
        Commands::Preset { name, dir } => commands::preset::run(&name, &dir, Some(print_status)),
        Commands::Presets { name: None } => {
            for preset in presets::PRESETS {
                println!("{:<12} {}", preset.name, preset.description);
            }
            Ok(Vec::new())
        }
        Commands::Presets { name: Some(name) } => commands::preset::show(&name).map(|json| {
            println!("{}", json);
            Vec::new()
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(2);
    }
}
