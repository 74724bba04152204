mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::hub_io::{self, HubError};
use crate::model::hub::Hub;
use crate::model::viewer::{Session, ViewerIdentity};
use crate::ops::visibility::{self, ScopedTree};
use crate::ops::{check, search};

/// Who is looking, as resolved from the command line
struct Viewer {
    session: Option<Session>,
    identity: ViewerIdentity,
}

impl Viewer {
    fn from_flag(user: Option<&str>) -> Self {
        let session = user.map(Session::for_user);
        let identity = ViewerIdentity::from_session(session.as_ref());
        Viewer { session, identity }
    }

    fn username(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.username.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let hub_dir = resolve_hub_dir(cli.hub_dir.as_deref())?;
    let viewer = Viewer::from_flag(cli.user.as_deref());

    match cli.command {
        None => Err("no subcommand given (run `navhub` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before hub discovery
            Commands::Init(args) => cmd_init(args),

            Commands::Tree(args) => cmd_tree(hub_dir.as_deref(), &viewer, args, json),
            Commands::Search(args) => cmd_search(hub_dir.as_deref(), &viewer, args, json),
            Commands::Check => cmd_check(hub_dir.as_deref(), json),
            Commands::Admin(args) => cmd_admin(hub_dir.as_deref(), &viewer, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Canonicalize the `-C` override, if any
pub fn resolve_hub_dir(dir: Option<&str>) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => {
            let abs = std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
            Ok(Some(abs))
        }
        None => Ok(None),
    }
}

fn load_hub(hub_dir: Option<&Path>) -> Result<Hub, HubError> {
    let start = match hub_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(HubError::IoError)?,
    };
    let root = hub_io::discover_hub(&start)?;
    hub_io::load_hub(&root)
}

fn scoped_tree(hub: &Hub, viewer: &Viewer) -> ScopedTree {
    debug!(authenticated = viewer.identity.authenticated, "scoping tree");
    visibility::filter(&hub.tree, viewer.identity)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_tree(
    hub_dir: Option<&Path>,
    viewer: &Viewer,
    args: TreeArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hub = load_hub(hub_dir)?;
    let scoped = scoped_tree(&hub, viewer);

    // A category the viewer cannot see is reported as missing, not as hidden
    let categories: &[_] = match args.category.as_deref() {
        Some(id) => std::slice::from_ref(
            scoped
                .tree()
                .find_category(id)
                .ok_or_else(|| format!("category not found: {}", id))?,
        ),
        None => scoped.categories(),
    };

    if json {
        let out = TreeJson {
            viewer: viewer_to_json(viewer.identity, viewer.username()),
            navigation_items: categories,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if categories.is_empty() {
        println!("No links");
    } else {
        for line in format_tree(categories) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_search(
    hub_dir: Option<&Path>,
    viewer: &Viewer,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hub = load_hub(hub_dir)?;
    let scoped = scoped_tree(&hub, viewer);
    let results = search::search(&scoped, &args.query);

    if json {
        let out = SearchJson {
            viewer: viewer_to_json(viewer.identity, viewer.username()),
            query: args.query.trim(),
            total: search::total_matches(&results),
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if search::Query::parse(&args.query).is_none() {
        println!("Empty query");
    } else if results.is_empty() {
        println!("No matches for \"{}\"", args.query.trim());
    } else {
        for line in format_search_results(&results) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check(hub_dir: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let hub = load_hub(hub_dir)?;
    let result = check::check_tree(&hub.tree);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if !result.errors.is_empty() {
            println!("Errors:");
            for err in &result.errors {
                match err {
                    check::CheckError::DuplicateId { parent, id, count } => {
                        let parent = if parent.is_empty() { "(top level)" } else { parent.as_str() };
                        println!("  {} has {} siblings with id \"{}\"", parent, count, id);
                    }
                }
            }
        }
        if !result.warnings.is_empty() {
            if !result.errors.is_empty() {
                println!();
            }
            println!("Warnings:");
            for warn in &result.warnings {
                match warn {
                    check::CheckWarning::MissingId { path, title } => {
                        println!("  {} missing id: \"{}\"", path, title);
                    }
                    check::CheckWarning::EmptyTitle { path } => {
                        println!("  {} has an empty title", path);
                    }
                    check::CheckWarning::InvalidHref { path, href } => {
                        println!("  {} has a non-URL link: \"{}\"", path, href);
                    }
                    check::CheckWarning::ShadowedItems { category, count } => {
                        println!(
                            "  {} has {} direct item(s) hidden by its sub-categories",
                            category, count
                        );
                    }
                }
            }
        }
        if result.valid {
            println!("✓ navigation data is valid");
        } else {
            println!("✗ navigation data has errors");
        }
    }
    Ok(())
}

fn cmd_admin(
    hub_dir: Option<&Path>,
    viewer: &Viewer,
    args: AdminArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hub = load_hub(hub_dir)?;
    let admins = config_io::admin_allowlist(&hub.config);
    let username = args.username.as_deref().or(viewer.username());
    let is_admin = username.map(|name| admins.is_admin(Some(name)));

    if json {
        let out = AdminJson {
            owner: admins.owner(),
            users: admins.additional_users(),
            username,
            is_admin,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match (username, is_admin) {
        (Some(name), Some(true)) => println!("{} is an admin", name),
        (Some(name), _) => println!("{} is not an admin", name),
        (None, _) => {
            println!("owner: {}", admins.owner().unwrap_or("(none)"));
            if admins.additional_users().is_empty() {
                println!("users: (none)");
            } else {
                println!("users: {}", admins.additional_users().join(", "));
            }
        }
    }
    Ok(())
}
