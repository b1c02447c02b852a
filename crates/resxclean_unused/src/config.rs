use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use path_clean::PathClean;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "unused")]
#[command(about = "Find and remove unused .resx resources")]
pub struct Config {
    /// Directory containing the base .resx files and their language variants
    #[arg(long)]
    pub resource_dir: PathBuf,

    /// Space-separated list of source directories to scan
    #[arg(long)]
    pub src_dirs: String,

    /// Report unused resources without rewriting any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Validate and normalize the configured paths
    pub fn initialize(&mut self) -> Result<()> {
        let resource_dir = self.resource_dir.clean();
        if !resource_dir.is_dir() {
            bail!("Resource directory {} does not exist", resource_dir.display());
        }
        info!("Using resource directory: {}", resource_dir.display());
        self.resource_dir = resource_dir;

        let dirs = self.source_dirs();
        if dirs.is_empty() {
            bail!("No source directories given");
        }
        debug!("Source directories: {:?}", dirs);
        Ok(())
    }

    /// Source directories in the order given, cleaned and without duplicates
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for part in self.src_dirs.split(' ').filter(|s| !s.is_empty()) {
            let dir = PathBuf::from(part).clean();
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}
