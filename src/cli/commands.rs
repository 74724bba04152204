use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "navhub", about = concat!("navhub v", env!("CARGO_PKG_VERSION"), " - your links, scoped to who is looking"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different hub directory
    #[arg(short = 'C', long = "hub-dir", global = true)]
    pub hub_dir: Option<String>,

    /// View as a signed-in user (omit to view anonymously)
    #[arg(short = 'u', long, global = true)]
    pub user: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new hub in the current directory
    Init(InitArgs),
    /// Show the navigation tree visible to the viewer
    Tree(TreeArgs),
    /// Search visible links by title or description
    Search(SearchArgs),
    /// Validate navigation data
    Check,
    /// Show the admin allowlist, or check a username against it
    Admin(AdminArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Site title (default: inferred from directory name)
    #[arg(long)]
    pub title: Option<String>,
    /// Admin owner username
    #[arg(long)]
    pub owner: Option<String>,
    /// Reinitialize even if navhub.toml already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Show only this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Query (case-insensitive substring; surrounding whitespace ignored)
    pub query: String,
}

#[derive(Args)]
pub struct AdminArgs {
    /// Username to check (default: the --user viewer)
    pub username: Option<String>,
}
