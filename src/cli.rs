//! Command-line surface over [`App`].

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use uma_planner::audit::audit;
use uma_planner::kv::FileKvStore;
use uma_planner::query::{parse_scores, parse_tags, SortKey, TriState};
use uma_planner::state::{Category, PersistentStore};
use uma_planner::ui::tooltip_text;
use uma_planner::{App, Config, Dataset};

#[derive(Debug, Parser)]
#[command(
    name = "uma-planner",
    about = "Browse unit ratings, track owned units and plan a five-category team",
    version
)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset JSON file
    #[arg(long, global = true, env = "UMA_DATASET")]
    pub data: Option<PathBuf>,

    /// Persisted state file
    #[arg(long, global = true, env = "UMA_STATE")]
    pub state: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the filtered, sorted table.
    List(ListArgs),

    /// Print tooltip details of one unit.
    Show {
        /// Unit name
        name: String,
    },

    /// Toggle the owned flag of a unit.
    Own {
        /// Unit name
        name: String,
    },

    /// Inspect or edit the team.
    #[command(subcommand)]
    Team(TeamCommand),

    /// Write owned units and team to a JSON document (stdout by default).
    Export {
        /// Output file
        path: Option<PathBuf>,
    },

    /// Replace owned units and/or team from an exported document.
    Import {
        /// Document to import
        path: PathBuf,
    },

    /// Forget every owned unit and empty the team.
    Reset,

    /// Report data-quality findings in the dataset.
    Audit,

    /// Read `<control-id> <value>` lines from stdin and re-render after each.
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Print the team planner.
    Show,

    /// Add a unit to a category.
    Add {
        /// Sprint, Mile, Medium, Long or Dirt
        category: Category,
        /// Unit name
        name: String,
    },

    /// Remove the unit at a slot index.
    Remove {
        /// Sprint, Mile, Medium, Long or Dirt
        category: Category,
        /// Slot index, starting at 0
        index: usize,
    },
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Free-text search over name and variant
    #[arg(long)]
    pub search: Option<String>,

    /// Distance tags, comma-separated
    #[arg(long)]
    pub distance: Option<String>,

    /// Style tags, comma-separated
    #[arg(long)]
    pub style: Option<String>,

    /// Team trials scores, comma-separated
    #[arg(long)]
    pub trials: Option<String>,

    /// Parent scores, comma-separated
    #[arg(long)]
    pub parent: Option<String>,

    /// any, yes or no
    #[arg(long)]
    pub debuff: Option<TriState>,

    /// any, yes or no
    #[arg(long)]
    pub owned: Option<TriState>,

    /// any, yes or no
    #[arg(long)]
    pub in_team: Option<TriState>,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Also print the team planner
    #[arg(long)]
    pub team: bool,
}

/// Resolve the layered config: defaults, config file, env, flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = &cli.data {
        config = config.dataset_path(path);
    }
    if let Some(path) = &cli.state {
        config = config.state_path(path);
    }
    if let Some(filter) = &cli.log {
        config = config.log_filter(filter);
    }
    Ok(config)
}

fn apply_list_args(app: &mut App<FileKvStore>, args: &ListArgs) -> Result<()> {
    let mut criteria = app.criteria().clone();
    if let Some(search) = &args.search {
        criteria.search.clone_from(search);
    }
    if let Some(tags) = &args.distance {
        criteria.distances = parse_tags(tags);
    }
    if let Some(tags) = &args.style {
        criteria.styles = parse_tags(tags);
    }
    if let Some(scores) = &args.trials {
        criteria.trial_scores = parse_scores(scores)?;
    }
    if let Some(scores) = &args.parent {
        criteria.parent_scores = parse_scores(scores)?;
    }
    if let Some(debuff) = args.debuff {
        criteria.debuff = debuff;
    }
    if let Some(owned) = args.owned {
        criteria.owned = owned;
    }
    if let Some(in_team) = args.in_team {
        criteria.in_team = in_team;
    }
    app.set_criteria(criteria);

    if let Some(key) = args.sort {
        app.sort_by(key);
        if args.desc {
            app.sort_by(key);
        }
    }
    Ok(())
}

/// Run the interactive shell until EOF or `quit`.
///
/// Besides control ids the shell understands `team`, `tooltip`, `help` and
/// `quit`. Rejected events print the error and leave state unchanged.
pub fn run_shell<R: BufRead, W: Write>(
    app: &mut App<FileKvStore>,
    input: R,
    out: &mut W,
) -> Result<()> {
    write!(out, "{}", app.render())?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (id, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match id {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "commands: team, tooltip, quit")?;
                writeln!(out, "controls:")?;
                for (control, _) in uma_planner::app::CONTROL_TABLE {
                    writeln!(out, "  {control} <value>")?;
                }
            }
            "team" => write!(out, "{}", app.render_team())?,
            "tooltip" => match app.render_tooltip() {
                Some(text) => write!(out, "{text}")?,
                None => writeln!(out, "no tooltip")?,
            },
            _ => match app.dispatch_id(id, value) {
                Ok(()) => write!(out, "{}", app.render())?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
        }
    }
    Ok(())
}

/// Execute one parsed command line.
pub async fn run<W: Write>(cli: Cli, config: &Config, out: &mut W) -> Result<()> {
    let dataset = Dataset::load_or_empty(&config.dataset_path).await;

    if matches!(cli.command, Commands::Audit) {
        write!(out, "{}", audit(&dataset))?;
        writeln!(out)?;
        return Ok(());
    }

    let kv = FileKvStore::open(&config.state_path)
        .with_context(|| format!("failed to open state {}", config.state_path.display()))?;
    let mut app = App::new(dataset, PersistentStore::new(kv))?;

    match cli.command {
        Commands::List(args) => {
            apply_list_args(&mut app, &args)?;
            write!(out, "{}", app.render())?;
            if args.team {
                writeln!(out)?;
                write!(out, "{}", app.render_team())?;
            }
        }
        Commands::Show { name } => {
            let unit = app
                .dataset()
                .get(&name)
                .ok_or_else(|| uma_planner::Error::UnitNotFound(name.clone()))?;
            write!(out, "{}", tooltip_text(unit))?;
        }
        Commands::Own { name } => {
            let owned = app.toggle_owned(&name)?;
            let status = if owned { "owned" } else { "not owned" };
            writeln!(out, "{name}: {status}")?;
        }
        Commands::Team(TeamCommand::Show) => write!(out, "{}", app.render_team())?,
        Commands::Team(TeamCommand::Add { category, name }) => {
            app.add_to_team(&name, category)?;
            write!(out, "{}", app.render_team())?;
        }
        Commands::Team(TeamCommand::Remove { category, index }) => {
            let removed = app.remove_from_team(category, index)?;
            writeln!(out, "removed {removed} from {category}")?;
            write!(out, "{}", app.render_team())?;
        }
        Commands::Export { path } => {
            let json = app.export()?.to_json()?;
            match path {
                Some(path) => {
                    tokio::fs::write(&path, &json)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "state exported");
                    writeln!(out, "exported to {}", path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Commands::Import { path } => {
            app.import_file(&path).await?;
            writeln!(
                out,
                "imported {}: {} owned, {} in team",
                path.display(),
                app.owned().owned_count(),
                app.team().len()
            )?;
        }
        Commands::Reset => {
            app.reset_state()?;
            info!("state reset");
            writeln!(out, "cleared owned units and team")?;
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            run_shell(&mut app, stdin.lock(), out)?;
        }
        Commands::Audit => {}
    }
    Ok(())
}
