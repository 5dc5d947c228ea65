// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{fmt, io, process::ExitStatus};

#[derive(Debug)]
pub enum PipelineError {
    Io(io::Error),
    Format(String),
    Json(serde_json::Error),
    Csv(csv::Error),
    Pattern(glob::PatternError),
    Predictor { command: String, status: ExitStatus },
}

// These allow conversion to PipelineError, required for main() to return Result<()> and for '?'
// to work.

impl From<io::Error> for PipelineError {
    fn from(e: io::Error) -> Self {
        PipelineError::Io(e)
    }
}

impl From<String> for PipelineError {
    fn from(s: String) -> Self {
        PipelineError::Format(s)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Json(e)
    }
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Csv(e)
    }
}

impl From<glob::PatternError> for PipelineError {
    fn from(e: glob::PatternError) -> Self {
        PipelineError::Pattern(e)
    }
}

// A glob entry that can't be read is an I/O problem on that path.
impl From<glob::GlobError> for PipelineError {
    fn from(e: glob::GlobError) -> Self {
        PipelineError::Io(e.into())
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
            PipelineError::Format(msg) => write!(f, "Format error: {}", msg),
            PipelineError::Json(e) => write!(f, "JSON error: {}", e),
            PipelineError::Csv(e) => write!(f, "Table error: {}", e),
            PipelineError::Pattern(e) => write!(f, "Bad file pattern: {}", e),
            PipelineError::Predictor { command, status } => {
                write!(f, "Predictor failed ({}): {}", status, command)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
