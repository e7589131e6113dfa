use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn a framework's collected-item records into a test tree
    Discover(DiscoverArgs),
}

#[derive(clap::Args, Debug)]
pub struct DiscoverArgs {
    /// Directory discovery starts from; only files under it are considered
    #[arg(long)]
    pub start_dir: PathBuf,

    /// File-name glob limiting which reported files are considered
    #[arg(long)]
    pub pattern: Option<String>,

    /// Directory test ids are rooted at (defaults to the start directory)
    #[arg(long)]
    pub top_level_dir: Option<PathBuf>,

    /// File holding the collected-item records as JSON, or '-' for stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Exit code reported by the framework's collection process
    #[arg(long, default_value_t = 0)]
    pub exit_code: i32,
}
