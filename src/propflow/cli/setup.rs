use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "propflow", bin_name = "propflow", version)]
#[command(
    about = "Render declarative component manifests and replay reducer tables",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Manifest to load (overrides the configured one)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub manifest: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a component with the given attributes
    #[command(alias = "r")]
    Render {
        /// Component name as declared in the manifest
        component: String,

        /// Attributes as a JSON object
        #[arg(short, long, conflicts_with = "attrs_file")]
        attrs: Option<String>,

        /// Read attributes from a JSON file
        #[arg(long)]
        attrs_file: Option<PathBuf>,

        /// Print the element tree instead of markup
        #[arg(long)]
        tree: bool,
    },

    /// Validate the manifest and compile its templates
    Check,

    /// Replay actions through a reducer and print the final state
    Reduce {
        /// Reducer name as declared in the manifest
        reducer: String,

        /// Actions as JSON: an action, a type string, or a list of either
        #[arg(long)]
        actions: String,

        /// Starting state as JSON (defaults to the reducer's initial value)
        #[arg(long)]
        state: Option<String>,
    },

    /// List components and reducers
    #[command(alias = "ls")]
    List,

    /// Get or set configuration
    Config {
        /// Configuration key (manifest, color)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create .propflow/ and a starter manifest
    Init,
}
