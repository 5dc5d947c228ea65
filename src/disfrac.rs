// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use itertools::Itertools;
use log::info;

use crate::errors::PipelineError;
use crate::inputs::{ensure_dir, file_stem, matching_files};
use crate::table::{read_prediction_table_file, PredictionRow};

/// Score above which a residue counts as disordered (Fuxreiter et al.).
pub const DEFAULT_THRESHOLD: f64 = 0.4;
pub const DEFAULT_OUTPUT_DIR: &str = "./processed_data/";

#[derive(Debug, Clone, PartialEq)]
pub struct DisorderFraction {
    pub protein_id: String,
    pub fraction: f64,
}

/// Labels embedded in a prediction table's file name, `<fasta-id>_..._<pred-type>.dat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetName {
    pub fasta_name: String,
    pub pred_type: String,
}

impl DatasetName {
    /// `speciesA_strain1_long.dat` -> (`speciesA_strain1`, `long`). The fasta name is the first
    /// two '_' tokens, the prediction type the last one.
    pub fn from_path(path: &Path) -> Self {
        let stem = file_stem(path);
        let tokens: Vec<&str> = stem.split('_').collect();
        DatasetName {
            fasta_name: tokens.iter().take(2).join("_"),
            pred_type: tokens.last().copied().unwrap_or_default().to_string(),
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}_{}_disfrac.tsv", self.fasta_name, self.pred_type)
    }
}

/// Per-protein fraction of residues scoring strictly above `threshold`, sorted by protein id.
pub fn disorder_fractions(rows: &[PredictionRow], threshold: f64) -> Vec<DisorderFraction> {
    rows.iter()
        .map(|row| (row.protein_id.as_str(), row.score))
        .into_group_map()
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(protein_id, scores)| {
            // groups are never empty
            let disordered = scores.iter().filter(|&&s| s > threshold).count();
            DisorderFraction {
                protein_id: protein_id.to_string(),
                fraction: disordered as f64 / scores.len() as f64,
            }
        })
        .collect()
}

pub fn write_disfrac_table<W: Write>(
    out: W,
    fractions: &[DisorderFraction],
) -> Result<(), PipelineError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(out);
    wtr.write_record(["Protein_ID", "disorder_fraction"])?;
    for df in fractions {
        wtr.serialize((&df.protein_id, df.fraction))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Computes disorder fractions for every prediction table in `input_dir` matching `pattern`
/// and writes one summary per table into `output_dir`. Returns the summaries written.
pub fn calc_disfrac(
    input_dir: &Path,
    output_dir: &Path,
    pattern: &str,
    threshold: f64,
) -> Result<Vec<PathBuf>, PipelineError> {
    let input_files = matching_files(input_dir, pattern)?;
    ensure_dir(output_dir)?;

    let mut written = Vec::new();
    for path in &input_files {
        let dataset = DatasetName::from_path(path);
        let rows = read_prediction_table_file(path)?;
        info!(
            "Loaded dataset {}, {} prediction type",
            dataset.fasta_name, dataset.pred_type
        );
        let fractions = disorder_fractions(&rows, threshold);
        let out_path = output_dir.join(dataset.output_file_name());
        write_disfrac_table(File::create(&out_path)?, &fractions)?;
        info!(
            "Calculated disorder fraction for dataset {}, {} prediction type",
            dataset.fasta_name, dataset.pred_type
        );
        written.push(out_path);
    }
    Ok(written)
}
