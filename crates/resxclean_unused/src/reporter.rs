use std::{
    collections::BTreeMap,
    env,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::{debug, trace};

use crate::types::CheckResult;

/// Shorten a path to be relative to the current directory when possible
fn display_path(path: &Path) -> String {
    match env::current_dir() {
        Ok(cwd) => path.strip_prefix(&cwd).unwrap_or(path).display().to_string(),
        Err(_) => {
            debug!("Failed to get current directory");
            path.display().to_string()
        }
    }
}

/// Groups `<baseName>.<itemName>` keys by base name
fn group_by_family(keys: &[String]) -> BTreeMap<&str, Vec<&str>> {
    let mut families: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for key in keys {
        if let Some((base, item)) = key.split_once('.') {
            families.entry(base).or_default().push(item);
        }
    }
    families
}

pub fn print_no_unused_message<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("No unused resources");
    writeln!(
        writer,
        "{} No unused resources. All {} resources are referenced.",
        "✓".green().bold(),
        result.resources_collected
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_no_resources_message<W: Write>(
    writer: &mut W,
    resource_dir: &Path,
) -> io::Result<()> {
    debug!("No resources collected");
    writeln!(
        writer,
        "{} No resources collected from {}. Nothing to check.",
        "●".bright_blue(),
        display_path(resource_dir).blue()
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_unused_tree<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let families = group_by_family(&result.unused);
    debug!("Printing {} unused resources in {} families", result.unused.len(), families.len());

    writeln!(
        writer,
        "{} {} unused resources\n",
        "⚠".yellow().bold(),
        result.unused.len().to_string().yellow()
    )?;

    for (base, items) in &families {
        trace!("Processing family: {} with {} items", base, items.len());
        writeln!(writer, "{} ({} unused)", base.blue(), items.len().to_string().red().bold())?;
        for (idx, item) in items.iter().enumerate() {
            let prefix = if idx == items.len() - 1 { "└──" } else { "├──" };
            writeln!(writer, "{}  {}", prefix.dimmed(), item)?;
        }
        writeln!(writer)?;
    }

    if !result.pruned.is_empty() {
        let verb = if result.dry_run { "Would update" } else { "Updated" };
        writeln!(writer, "{} {} files:", verb.bold(), result.pruned.len())?;
        for file in &result.pruned {
            writeln!(
                writer,
                "  {} (-{} items)",
                display_path(&file.path).blue(),
                file.removed.to_string().red()
            )?;
        }
        writeln!(writer)?;
    }

    print_summary(writer, result)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Resources collected: {}", result.resources_collected.to_string().cyan())?;
    writeln!(writer, "  Files scanned: {}", result.files_scanned.to_string().cyan())?;
    writeln!(writer, "  Resources remaining: {}", result.unused.len().to_string().yellow().bold())?;
    Ok(())
}

pub fn print_json<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
