// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Prediction tables: tab-separated, no header, one row per residue:
//
//   row-index  Position  Residue  Score  Protein_ID

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::errors::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub position: usize,
    pub residue: char,
    pub score: f64,
    pub protein_id: String,
}

impl PredictionRow {
    pub fn new(position: usize, residue: char, score: f64, protein_id: impl Into<String>) -> Self {
        PredictionRow {
            position,
            residue,
            score,
            protein_id: protein_id.into(),
        }
    }
}

// On-disk layout of a row.
type TableLine = (usize, usize, char, f64, String);

pub fn write_prediction_table<W: Write>(
    out: W,
    rows: &[PredictionRow],
) -> Result<(), PipelineError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(out);
    for (index, row) in rows.iter().enumerate() {
        wtr.serialize((index, row.position, row.residue, row.score, &row.protein_id))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_prediction_table_file<P: AsRef<Path>>(
    path: P,
    rows: &[PredictionRow],
) -> Result<(), PipelineError> {
    write_prediction_table(File::create(path)?, rows)
}

pub fn read_prediction_table<R: Read>(reader: R) -> Result<Vec<PredictionRow>, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let (_index, position, residue, score, protein_id): TableLine = result?;
        rows.push(PredictionRow::new(position, residue, score, protein_id));
    }
    Ok(rows)
}

pub fn read_prediction_table_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PredictionRow>, PipelineError> {
    read_prediction_table(File::open(path)?)
}
