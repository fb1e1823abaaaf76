use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use plantation_training::lineage::Lineage;

use crate::{logging, store::LineageStore};

use super::DEFAULT_LINEAGE_DIR;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowLineageArg {
    /// Agent name the lineage was saved under
    #[arg(long)]
    name: String,
    /// Directory holding one lineage file per agent name
    #[arg(long, default_value = DEFAULT_LINEAGE_DIR)]
    lineage_dir: PathBuf,
}

pub(crate) fn run(arg: &ShowLineageArg) -> anyhow::Result<()> {
    let ShowLineageArg { name, lineage_dir } = arg;
    logging::init(None)?;

    let lineage = LineageStore::new(lineage_dir).load(name)?;
    write_summary(&mut io::stdout().lock(), name, &lineage)
        .context("Failed to write lineage summary")?;
    Ok(())
}

fn write_summary<W>(writer: &mut W, name: &str, lineage: &Lineage) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "Lineage {name}:")?;
    writeln!(writer, "  Generation:          {}", lineage.generation)?;
    writeln!(writer, "  Rounds played:       {}", lineage.rounds_played)?;
    writeln!(writer, "  Next species:        {}", lineage.next_species_to_play)?;
    match lineage.updated_at {
        Some(updated_at) => writeln!(writer, "  Updated at:          {}", updated_at.to_rfc3339())?,
        None => writeln!(writer, "  Updated at:          never")?,
    }
    writeln!(writer, "  Species:")?;
    for (i, species) in lineage.species.iter().enumerate() {
        writeln!(
            writer,
            "  {i:2}: fitness {:>6}, {} genes",
            species.fitness,
            species.genes.len()
        )?;
    }
    Ok(())
}
