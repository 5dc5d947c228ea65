// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Runs IUPred once per FastA record and collects its per-residue scores into one prediction
// table per input file.

use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use clap::ValueEnum;
use log::{debug, info, warn};

use crate::errors::PipelineError;
use crate::inputs::{ensure_dir, file_stem, matching_files, output_dir_for};
use crate::seq::fasta::{read_fasta_file, write_fasta_record, FASTA_LINE_WIDTH};
use crate::seq::record::SeqRecord;
use crate::table::{write_prediction_table_file, PredictionRow};

pub const DEFAULT_PREDICTOR_DIR: &str = "./software/iupred/";
pub const PREDICTOR_EXE: &str = "iupred";
/// IUPred looks up its data files through this variable.
pub const PREDICTOR_ENV_VAR: &str = "IUPred_PATH";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PredictionMode {
    #[clap(name = "short")]
    #[clap(alias = "s")]
    Short,
    #[clap(name = "long")]
    #[clap(alias = "l")]
    Long,
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PredictionMode::Short => "short",
            PredictionMode::Long => "long",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct Predictor {
    pub executable: PathBuf,
    pub resource_dir: PathBuf,
}

impl Predictor {
    /// IUPred installed in `dir`: the binary is `dir/iupred` and `dir` holds its data files.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Predictor {
            executable: dir.join(PREDICTOR_EXE),
            resource_dir: dir.to_path_buf(),
        }
    }

    /// Predicts one record. The sequence is staged in a temporary FastA file that is removed
    /// when this returns.
    pub fn predict(
        &self,
        record: &SeqRecord,
        mode: PredictionMode,
    ) -> Result<Vec<PredictionRow>, PipelineError> {
        let rec_id = record.record_id();
        let mut tmp_seq = tempfile::Builder::new()
            .prefix("iupred-")
            .suffix(".fasta")
            .tempfile()?;
        write_fasta_record(&mut tmp_seq, rec_id, &record.sequence, FASTA_LINE_WIDTH)?;
        tmp_seq.flush()?;
        info!("Predicting record {} in tempfile {}", rec_id, tmp_seq.path().display());

        let command_line = format!(
            "{} {} {}",
            self.executable.display(),
            tmp_seq.path().display(),
            mode
        );
        debug!("Running {}", command_line);
        let output = Command::new(&self.executable)
            .arg(tmp_seq.path())
            .arg(mode.to_string())
            .env(PREDICTOR_ENV_VAR, &self.resource_dir)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                PipelineError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to run {}: {}", self.executable.display(), e),
                ))
            })?;
        if !output.status.success() {
            return Err(PipelineError::Predictor {
                command: command_line,
                status: output.status,
            });
        }

        let rows = parse_prediction_output(&String::from_utf8_lossy(&output.stdout), rec_id)?;
        if rows.len() != record.len() {
            warn!(
                "Record {}: {} residues but {} predicted rows",
                rec_id,
                record.len(),
                rows.len()
            );
        }
        Ok(rows)
    }
}

/// Parses IUPred's standard output: whitespace-delimited `position residue score` lines, with
/// '#' comments and blank lines skipped. Every row is tagged with `protein_id`.
pub fn parse_prediction_output(
    text: &str,
    protein_id: &str,
) -> Result<Vec<PredictionRow>, PipelineError> {
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let bad_line = || {
            PipelineError::Format(format!(
                "Bad predictor output line {}: '{}'",
                lineno + 1,
                trimmed
            ))
        };
        let mut fields = trimmed.split_whitespace();
        let (Some(pos), Some(res), Some(score), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(bad_line());
        };
        let position: usize = pos.parse().map_err(|_| bad_line())?;
        let mut res_chars = res.chars();
        let (Some(residue), None) = (res_chars.next(), res_chars.next()) else {
            return Err(bad_line());
        };
        let score: f64 = score.parse().map_err(|_| bad_line())?;
        rows.push(PredictionRow::new(position, residue, score, protein_id));
    }
    Ok(rows)
}

/// Name of the prediction table for a FastA file, e.g. `ECOLI_nr100.fasta` in long mode gives
/// `ECOLI_nr100_IUpred_res_long.dat`.
pub fn result_file_name(fasta_path: &Path, mode: PredictionMode) -> String {
    format!("{}_IUpred_res_{}.dat", file_stem(fasta_path), mode)
}

/// Predicts every record of every matching FastA file in `input_dir`, writing one table per
/// file into the output directory. Returns the paths of the tables written.
pub fn run_predictions(
    input_dir: &Path,
    mode: PredictionMode,
    pattern: &str,
    predictor: &Predictor,
) -> Result<Vec<PathBuf>, PipelineError> {
    let input_files = matching_files(input_dir, pattern)?;
    let output_dir = output_dir_for(input_dir)?;
    ensure_dir(&output_dir)?;

    let mut written = Vec::new();
    for path in &input_files {
        info!("Running IUPred ({}) on {}", mode, path.display());
        let mut rows: Vec<PredictionRow> = Vec::new();
        for record in read_fasta_file(path)? {
            rows.extend(predictor.predict(&record, mode)?);
        }
        let res_path = output_dir.join(result_file_name(path, mode));
        write_prediction_table_file(&res_path, &rows)?;
        info!("Wrote {} rows to {}", rows.len(), res_path.display());
        written.push(res_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_prediction_output() {
        let out = "# IUPred \n\
                   # Prediction output \n\
                   # output for  1 sequence(s)\n\
                   \x20   1 M     0.5436\n\
                   \x20   2 K     0.3100\n\
                   \n";
        let rows = parse_prediction_output(out, "P1").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].residue, 'M');
        assert_abs_diff_eq!(rows[0].score, 0.5436);
        assert_eq!(rows[1].protein_id, "P1");
    }

    #[test]
    fn test_parse_prediction_output_bad_line() {
        assert!(matches!(
            parse_prediction_output("1 M\n", "P1"),
            Err(PipelineError::Format(_))
        ));
        assert!(matches!(
            parse_prediction_output("x M 0.1\n", "P1"),
            Err(PipelineError::Format(_))
        ));
        assert!(matches!(
            parse_prediction_output("1 MK 0.1\n", "P1"),
            Err(PipelineError::Format(_))
        ));
    }

    #[test]
    fn test_result_file_name() {
        assert_eq!(
            result_file_name(Path::new("in/ECOLI_nr100.fasta"), PredictionMode::Long),
            "ECOLI_nr100_IUpred_res_long.dat"
        );
        assert_eq!(
            result_file_name(Path::new("SALTY_nr100.fasta"), PredictionMode::Short),
            "SALTY_nr100_IUpred_res_short.dat"
        );
    }

    #[test]
    fn test_predictor_from_dir() {
        let p = Predictor::from_dir("/opt/iupred");
        assert_eq!(p.executable, PathBuf::from("/opt/iupred/iupred"));
        assert_eq!(p.resource_dir, PathBuf::from("/opt/iupred"));
    }

    #[test]
    fn test_missing_executable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::from_dir(dir.path());
        let rec = SeqRecord::new("sp|P1|X", "MKV");
        assert!(matches!(
            predictor.predict(&rec, PredictionMode::Short),
            Err(PipelineError::Io(_))
        ));
    }
}
