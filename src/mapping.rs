// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Identifier and taxon maps built from a directory of FastA files, persisted as JSON (sorted
// keys, 4-space indent).

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::PipelineError;
use crate::inputs::{ensure_dir, file_id, matching_files, output_dir_for};
use crate::seq::fasta::read_fasta_file;

pub const FASTA2PROT_FNAME: &str = "fasta2prot_map.json";
pub const PROT2FASTA_FNAME: &str = "prot2fasta_map.json";
pub const PROT2TAXON_FNAME: &str = "prot2taxon_map.json";

/// A record id listed under more than one file id. The inverse map keeps `kept`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdCollision {
    pub record_id: String,
    pub kept: String,
    pub dropped: String,
}

/// File id -> record ids, in file order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdMap {
    forward: BTreeMap<String, Vec<String>>,
    // File ids in the order they were (last) added.
    #[serde(skip)]
    order: Vec<String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the record ids of one file. If the file id was already present its previous list
    /// is returned.
    pub fn add_file(&mut self, file_id: &str, record_ids: Vec<String>) -> Option<Vec<String>> {
        self.order.retain(|fid| fid != file_id);
        self.order.push(file_id.to_string());
        self.forward.insert(file_id.to_string(), record_ids)
    }

    pub fn forward(&self) -> &BTreeMap<String, Vec<String>> {
        &self.forward
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Record id -> file id. File ids are visited in the order they were added and the last
    /// one wins; every record id that appeared under two different file ids is reported.
    pub fn inverse(&self) -> (BTreeMap<String, String>, Vec<IdCollision>) {
        let mut inverse: BTreeMap<String, String> = BTreeMap::new();
        let mut collisions = Vec::new();
        for fid in &self.order {
            for rid in &self.forward[fid] {
                if let Some(prev) = inverse.insert(rid.clone(), fid.clone()) {
                    if prev != *fid {
                        collisions.push(IdCollision {
                            record_id: rid.clone(),
                            kept: fid.clone(),
                            dropped: prev,
                        });
                    }
                }
            }
        }
        (inverse, collisions)
    }
}

/// Record id -> taxon; `None` (JSON null) when the header has no `OX=` token.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaxonMap {
    taxa: BTreeMap<String, Option<String>>,
}

impl TaxonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous taxon if the record id was already mapped to a different one.
    pub fn insert(&mut self, record_id: &str, taxon: Option<String>) -> Option<Option<String>> {
        match self.taxa.insert(record_id.to_string(), taxon.clone()) {
            Some(prev) if prev != taxon => Some(prev),
            _ => None,
        }
    }

    pub fn get(&self, record_id: &str) -> Option<&Option<String>> {
        self.taxa.get(record_id)
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), PipelineError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}

/// Builds the file <-> protein maps for all files in `input_dir` matching `pattern`, and writes
/// them to the output directory. Returns the forward map and the output directory.
pub fn map_prot_fasta(input_dir: &Path, pattern: &str) -> Result<(IdMap, PathBuf), PipelineError> {
    let input_files = matching_files(input_dir, pattern)?;
    let output_dir = output_dir_for(input_dir)?;
    ensure_dir(&output_dir)?;

    info!("Mapping FASTAs and proteins in {}", input_dir.display());
    let mut id_map = IdMap::new();
    for path in &input_files {
        let fasta_id = file_id(path);
        info!("Processing {}", path.display());
        let records = read_fasta_file(path)?;
        let record_ids = records.iter().map(|r| r.record_id().to_string()).collect();
        if id_map.add_file(&fasta_id, record_ids).is_some() {
            warn!(
                "FASTA id {} occurs in more than one file; keeping {}",
                fasta_id,
                path.display()
            );
        }
    }

    let (prot2fasta, collisions) = id_map.inverse();
    for c in &collisions {
        warn!(
            "Protein {} found in {} and {}; mapping it to {}",
            c.record_id, c.dropped, c.kept, c.kept
        );
    }

    write_json(output_dir.join(FASTA2PROT_FNAME), &id_map)?;
    write_json(output_dir.join(PROT2FASTA_FNAME), &prot2fasta)?;
    Ok((id_map, output_dir))
}

/// Maps every protein of every matching file to its taxon and writes the map to the output
/// directory.
pub fn map_prot_taxon(
    input_dir: &Path,
    pattern: &str,
) -> Result<(TaxonMap, PathBuf), PipelineError> {
    let input_files = matching_files(input_dir, pattern)?;
    let output_dir = output_dir_for(input_dir)?;
    ensure_dir(&output_dir)?;

    info!("Mapping taxa and proteins in {}", input_dir.display());
    let mut taxon_map = TaxonMap::new();
    for path in &input_files {
        info!("Processing {}", path.display());
        for record in read_fasta_file(path)? {
            let taxon = record.taxon().map(String::from);
            if taxon.is_none() {
                debug!("No taxon (OX=) for protein {}", record.record_id());
            }
            if let Some(prev) = taxon_map.insert(record.record_id(), taxon) {
                warn!(
                    "Protein {} has conflicting taxa; {:?} replaced",
                    record.record_id(),
                    prev
                );
            }
        }
    }

    write_json(output_dir.join(PROT2TAXON_FNAME), &taxon_map)?;
    Ok((taxon_map, output_dir))
}
