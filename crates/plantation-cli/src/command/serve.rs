use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;
use plantation_training::genetic::EvolutionParams;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use tracing::error;

use crate::{logging, player::Player, protocol::Request, store::LineageStore};

use super::DEFAULT_LINEAGE_DIR;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ServeArg {
    /// Directory holding one lineage file per agent name
    #[arg(long, default_value = DEFAULT_LINEAGE_DIR)]
    lineage_dir: PathBuf,
    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// Append log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Default for ServeArg {
    fn default() -> Self {
        Self {
            lineage_dir: PathBuf::from(DEFAULT_LINEAGE_DIR),
            seed: None,
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &ServeArg) -> anyhow::Result<()> {
    let ServeArg {
        lineage_dir,
        seed,
        log_file,
    } = arg;
    logging::init(log_file.as_deref())?;

    let rng = match seed {
        Some(seed) => Pcg32::seed_from_u64(*seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut player = Player::new(
        LineageStore::new(lineage_dir),
        EvolutionParams::default(),
        rng,
    );
    serve(&mut player, io::stdin().lock(), io::stdout().lock()).inspect_err(|err| {
        error!("{err:#}");
    })
}

/// Answers every request line of `reader` with one JSON line on `writer`.
///
/// Blank lines are skipped. The first failing request ends the loop.
pub(crate) fn serve<R, W>(player: &mut Player, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read request line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let request: Request = serde_json::from_str(&line)
            .with_context(|| format!("Failed to decode request on line {line_no}"))?;
        let function = request.function();
        let response = player
            .handle(request)
            .with_context(|| format!("Failed to handle {function} on line {line_no}"))?;
        serde_json::to_writer(&mut writer, &response)
            .with_context(|| format!("Failed to write response to {function}"))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to flush response to {function}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use plantation_engine::BOARD_SIZE;

    use super::*;

    fn request_lines(board: &[Vec<i32>]) -> String {
        let board = serde_json::to_string(board).unwrap();
        let mut input = String::new();
        writeln!(input, r#"{{"function": "init", "name": "eve"}}"#).unwrap();
        writeln!(input, r#"{{"function": "start_game", "sign": 1}}"#).unwrap();
        writeln!(input).unwrap();
        writeln!(
            input,
            r#"{{"function": "get_move", "board": {board}, "turn": 1, "moves_remaining": 1}}"#
        )
        .unwrap();
        writeln!(
            input,
            r#"{{"function": "end_game", "your_score": 3, "opponent_score": 1}}"#
        )
        .unwrap();
        input
    }

    #[test]
    fn test_one_response_line_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = LineageStore::new(dir.path());
        let mut player = Player::new(
            store.clone(),
            EvolutionParams::default(),
            Pcg32::seed_from_u64(5),
        );
        let mut board = vec![vec![0; BOARD_SIZE]; BOARD_SIZE];
        board[5][10] = -1;

        let mut output = Vec::new();
        serve(&mut player, request_lines(&board).as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4, "{output}");
        assert_eq!(lines[0], r#""""#);
        assert_eq!(lines[1], r#""""#);
        assert_eq!(lines[3], r#""""#);

        let (family, params): (String, Vec<usize>) = serde_json::from_str(lines[2]).unwrap();
        assert!(["plant", "fertilise", "scout"].contains(&family.as_str()), "{family}");
        assert_eq!(params.len(), 2);

        assert_eq!(store.load("eve").unwrap().next_species_to_play, 1);
    }

    #[test]
    fn test_invalid_line_stops_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = Player::new(
            LineageStore::new(dir.path()),
            EvolutionParams::default(),
            Pcg32::seed_from_u64(6),
        );
        let input = concat!(
            r#"{"function": "init", "name": "eve"}"#,
            "\nnot json\n",
            r#"{"function": "start_game", "sign": 1}"#,
            "\n",
        );
        let mut output = Vec::new();
        let err = serve(&mut player, input.as_bytes(), &mut output).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert_eq!(String::from_utf8(output).unwrap(), "\"\"\n");
    }
}
