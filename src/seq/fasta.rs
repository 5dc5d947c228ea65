// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::errors::PipelineError;
use crate::seq::record::SeqRecord;

// A sequence file is just its records, in file order.
pub type SeqFile = Vec<SeqRecord>;

/// Line width used when writing sequences back out.
pub const FASTA_LINE_WIDTH: usize = 60;

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, PipelineError> {
    let file = File::open(path)?;
    read_fasta(BufReader::new(file))
}

pub fn read_fasta<R: BufRead>(reader: R) -> Result<SeqFile, PipelineError> {
    let mut result: SeqFile = Vec::new();
    let mut current_record: Option<SeqRecord> = None;

    for line in reader.lines() {
        let l = line?;
        let l = l.trim_end();
        if let Some(hdr) = l.strip_prefix('>') {
            if let Some(rec) = current_record.take() {
                result.push(rec);
            }
            current_record = Some(SeqRecord::new(hdr.trim_start(), String::new()));
        } else if l.is_empty() || l.starts_with(';') {
            continue;
        } else {
            // append line to current record's sequence
            match current_record.as_mut() {
                Some(rec) => rec.sequence.push_str(l.trim_start()),
                None => {
                    return Err(PipelineError::Format(String::from(
                        "Sequence data before first FastA header",
                    )))
                }
            }
        }
    }
    if let Some(rec) = current_record {
        result.push(rec);
    }
    Ok(result)
}

/// Writes a single record as `>header`, then the sequence wrapped at `width` columns.
pub fn write_fasta_record<W: Write>(
    out: &mut W,
    header: &str,
    sequence: &str,
    width: usize,
) -> Result<(), PipelineError> {
    writeln!(out, ">{}", header)?;
    let chars: Vec<char> = sequence.chars().collect();
    for chunk in chars.chunks(width.max(1)) {
        let line: String = chunk.iter().collect();
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
