//! Command dispatch for the ordtree binary

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, TreeInput};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{OrderedTree, TraversalOrder, TreeError, TreeRender};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Walk {
            input,
            order,
            limit,
            stop_at,
        }) => cmd_walk(&settings, input, order.unwrap_or(settings.order), *limit, *stop_at),
        Some(Commands::Show { input }) => cmd_show(&settings, input),
        Some(Commands::Find { key, input }) => cmd_find(&settings, input, *key),
        Some(Commands::Stats { input }) => cmd_stats(&settings, input),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Builds a tree from the command line input under the loaded settings.
///
/// Deleting a value that is not present is reported and skipped.
#[instrument(level = "debug", skip(settings))]
pub fn build_tree(settings: &Settings, input: &TreeInput) -> CliResult<OrderedTree<i64>> {
    let mut tree = OrderedTree::builder()
        .natural_order()
        .max_nodes(settings.max_nodes)
        .depth_warning(settings.depth_warning)
        .build()?;

    for &value in &input.values {
        tree.insert(value).map_err(TreeError::from)?;
    }
    for value in &input.delete {
        if let Err(e) = tree.delete(value) {
            output::warning(&format!("cannot delete {}: {}", value, e));
        }
    }
    Ok(tree)
}

/// Elements of `tree` in `order`, honouring an element limit and a stop value.
pub fn walk(
    tree: &OrderedTree<i64>,
    order: TraversalOrder,
    limit: Option<usize>,
    stop_at: Option<i64>,
) -> CliResult<Vec<i64>> {
    if limit == Some(0) {
        return Err(CliError::InvalidArgs("--limit must be at least 1".into()));
    }

    let mut seen = Vec::new();
    match (limit, stop_at) {
        (Some(limit), None) => {
            let mut buffer: Vec<Option<&i64>> = vec![None; limit];
            let written = tree.traverse_into(order, &mut buffer);
            seen.extend(buffer.into_iter().take(written).flatten().copied());
        }
        (limit, Some(stop)) => {
            let budget = limit.unwrap_or(usize::MAX);
            tree.for_each_with(
                order,
                |value, seen: &mut Vec<i64>| {
                    seen.push(*value);
                    *value == stop || seen.len() >= budget
                },
                &mut seen,
            );
        }
        (None, None) => seen.extend(tree.iter(order).copied()),
    }
    Ok(seen)
}

fn cmd_walk(
    settings: &Settings,
    input: &TreeInput,
    order: TraversalOrder,
    limit: Option<usize>,
    stop_at: Option<i64>,
) -> CliResult<()> {
    let tree = build_tree(settings, input)?;
    let values = walk(&tree, order, limit, stop_at)?;
    output::action(&order.to_string(), &values.iter().join(" "));
    Ok(())
}

fn cmd_show(settings: &Settings, input: &TreeInput) -> CliResult<()> {
    let tree = build_tree(settings, input)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

fn cmd_find(settings: &Settings, input: &TreeInput, key: i64) -> CliResult<()> {
    let tree = build_tree(settings, input)?;
    match tree.find_value(&key) {
        Some(value) => output::success(&format!("found {}", value)),
        None => output::failure(&format!("{} not in tree", key)),
    }
    Ok(())
}

fn cmd_stats(settings: &Settings, input: &TreeInput) -> CliResult<()> {
    let tree = build_tree(settings, input)?;
    output::action("size", &tree.len());
    output::action("height", &tree.height());
    match tree.root() {
        Some(root) => output::action("root", root),
        None => output::action("root", "-"),
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&toml::to_string_pretty(settings)?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}
