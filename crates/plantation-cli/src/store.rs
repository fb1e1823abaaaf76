use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use plantation_training::lineage::Lineage;
use tracing::info;

/// One lineage file per agent name under a common directory.
#[derive(Debug, Clone)]
pub(crate) struct LineageStore {
    dir: PathBuf,
}

impl LineageStore {
    pub(crate) fn new<P>(dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { dir: dir.into() }
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }

    /// Loads the lineage of `name`, or a fresh one if it has never been saved.
    pub(crate) fn load(&self, name: &str) -> anyhow::Result<Lineage> {
        let path = self.path(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no lineage at {}, starting a fresh one", path.display());
                return Ok(Lineage::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to open lineage file: {}", path.display()));
            }
        };
        let lineage: Lineage = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse lineage file: {}", path.display()))?;
        info!(
            "loaded lineage {name} at generation {} from {}",
            lineage.generation,
            path.display()
        );
        Ok(lineage)
    }

    /// Rewrites the lineage of `name` in full, replacing the old file atomically.
    pub(crate) fn save(&self, name: &str, lineage: &Lineage) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create lineage directory: {}", self.dir.display())
        })?;
        let path = self.path(name);
        let tmp_path = path.with_extension("json.tmp");
        write_json(&tmp_path, lineage)?;
        fs::rename(&tmp_path, &path).with_context(|| {
            format!(
                "Failed to move {} over {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        info!("saved lineage {name} to {}", path.display());
        Ok(())
    }
}

fn write_json(path: &Path, lineage: &Lineage) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create lineage file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, lineage)
        .with_context(|| format!("Failed to write lineage to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush lineage file: {}", path.display()))?;
    Ok(())
}

/// Maps an agent name to a file stem: every character outside `[A-Za-z0-9_-]` becomes `_`.
fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_owned();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
