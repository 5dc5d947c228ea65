// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Optional user settings, read from a JSON file named `.disorderconfig` in $HOME or the
// current directory, e.g.
//
//   { "predictor_dir": "/opt/iupred/", "fasta_pattern": "*.fasta", "threshold": 0.5 }

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::disfrac::DEFAULT_THRESHOLD;
use crate::errors::PipelineError;
use crate::inputs::DEFAULT_FASTA_PATTERN;
use crate::predict::DEFAULT_PREDICTOR_DIR;

pub const CONFIG_FNAME: &str = ".disorderconfig";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub predictor_dir: Option<PathBuf>,
    pub fasta_pattern: Option<String>,
    pub threshold: Option<f64>,
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        if let Some(t) = config.threshold {
            check_threshold(t)?;
        }
        Ok(config)
    }

    pub fn predictor_dir(&self) -> PathBuf {
        self.predictor_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREDICTOR_DIR))
    }

    pub fn fasta_pattern(&self) -> &str {
        self.fasta_pattern.as_deref().unwrap_or(DEFAULT_FASTA_PATTERN)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }
}

/// Disorder thresholds are scores, so they must lie in [0, 1]. NaN is rejected too.
pub fn check_threshold(t: f64) -> Result<f64, PipelineError> {
    if (0.0..=1.0).contains(&t) {
        Ok(t)
    } else {
        Err(PipelineError::Format(format!(
            "threshold must be within [0, 1], got {}",
            t
        )))
    }
}

pub fn find_config() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FNAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FNAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
