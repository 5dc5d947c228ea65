// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use glob::{glob, Pattern};

use crate::errors::PipelineError;

pub const DEFAULT_FASTA_PATTERN: &str = "*_nr100.fasta";
pub const DEFAULT_TABLE_PATTERN: &str = "*.dat";
pub const OUTPUT_DIR_PREFIX: &str = "iupred_";

/// Files in `dir` whose names match `pattern`, in sorted order. A missing directory is an error
/// (glob would just report no matches).
pub fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input directory {} not found", dir.display()),
        )));
    }
    let escaped_dir = PathBuf::from(Pattern::escape(&dir.to_string_lossy()));
    let full_pattern = escaped_dir.join(pattern);
    let mut files = Vec::new();
    for entry in glob(&full_pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Where the mapper and the prediction runner put their output: a sibling of the input
/// directory, named after it with the `iupred_` prefix. Paths ending in `.` or `..` are
/// resolved first so the directory keeps its real name.
pub fn output_dir_for(input_dir: &Path) -> Result<PathBuf, PipelineError> {
    let dir = match input_dir.components().next_back() {
        Some(Component::Normal(_)) => input_dir.to_path_buf(),
        _ => fs::canonicalize(input_dir)?,
    };
    let name = dir.file_name().ok_or_else(|| {
        PipelineError::Format(format!(
            "Can't name an output directory after {}",
            input_dir.display()
        ))
    })?;
    let out_name = format!("{}{}", OUTPUT_DIR_PREFIX, name.to_string_lossy());
    Ok(match dir.parent() {
        Some(parent) => parent.join(out_name),
        None => PathBuf::from(out_name),
    })
}

/// Creates `dir` (and parents); an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Text before the first '_' of the file name, e.g. `ECOLI_nr100.fasta` -> `ECOLI`.
pub fn file_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('_') {
        Some((head, _)) => head.to_string(),
        None => name,
    }
}

/// File name up to the first '.', e.g. `ECOLI_nr100.fasta` -> `ECOLI_nr100`.
pub fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((head, _)) => head.to_string(),
        None => name,
    }
}
