//! Context setup and per-command handlers.
//!
//! Handlers call the API, then hand the `CmdResult` to `render` for
//! formatting. Nothing here contains propflow logic.

use super::logging;
use super::render::{print_messages, render_config, render_listing, render_state};
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use propflow::api::{ConfigAction, PropflowApi, PropflowPaths};
use propflow::config::PropflowConfig;
use propflow::error::Result;
use propflow::manifest::ManifestFile;
use std::fs;
use std::path::PathBuf;

struct AppContext {
    api: PropflowApi<ManifestFile>,
    color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Render {
            component,
            attrs,
            attrs_file,
            tree,
        }) => handle_render(&ctx, &component, attrs, attrs_file, tree),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::Reduce {
            reducer,
            actions,
            state,
        }) => handle_reduce(&ctx, &reducer, state, &actions),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let paths = PropflowPaths::for_root(cwd);

    let config = PropflowConfig::load(&paths.config_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        PropflowConfig::default()
    });

    let manifest = match &cli.manifest {
        Some(path) => paths.manifest_path(path),
        None => paths.manifest_path(&config.manifest),
    };
    tracing::debug!(manifest = %manifest.display(), "resolved manifest path");

    let color = config.color && !cli.no_color && Term::stdout().features().colors_supported();
    if !color {
        colored::control::set_override(false);
    }

    let api = PropflowApi::new(ManifestFile::new(manifest), paths).with_color(color);
    Ok(AppContext { api, color })
}

fn handle_render(
    ctx: &AppContext,
    component: &str,
    attrs: Option<String>,
    attrs_file: Option<PathBuf>,
    tree: bool,
) -> Result<()> {
    let attrs = match attrs_file {
        Some(path) => Some(fs::read_to_string(path)?),
        None => attrs,
    };
    let result = ctx.api.render(component, attrs.as_deref(), tree)?;
    if let Some(rendered) = &result.rendered {
        println!("{}", rendered);
    }
    if let Some(element) = &result.tree {
        print!("{}", element);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reduce(
    ctx: &AppContext,
    reducer: &str,
    state: Option<String>,
    actions: &str,
) -> Result<()> {
    let result = ctx.api.reduce(reducer, state.as_deref(), actions)?;
    if let Some(state) = &result.state {
        println!("{}", render_state(state)?);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print!(
        "{}",
        render_listing(&result.components, &result.reducers, ctx.color)
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print!("{}", render_config(config));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
