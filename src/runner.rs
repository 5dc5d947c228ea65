// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};

use crate::config::{check_threshold, find_config, PipelineConfig};
use crate::disfrac::{calc_disfrac, DEFAULT_OUTPUT_DIR};
use crate::errors::PipelineError;
use crate::inputs::DEFAULT_TABLE_PATTERN;
use crate::mapping::{map_prot_fasta, map_prot_taxon};
use crate::predict::{run_predictions, PredictionMode, Predictor};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    #[command(subcommand)]
    command: PipelineCommand,
}

#[derive(Debug, Subcommand)]
enum PipelineCommand {
    /// Map FastA files to their proteins and back (fasta2prot_map.json, prot2fasta_map.json)
    Map {
        /// Directory of FastA files
        input_dir: PathBuf,
        /// File name pattern [default: *_nr100.fasta]
        pattern: Option<String>,
    },

    /// Map proteins to their taxon, from OX= header tokens (prot2taxon_map.json)
    Taxon {
        /// Directory of FastA files
        input_dir: PathBuf,
        /// File name pattern [default: *_nr100.fasta]
        pattern: Option<String>,
    },

    /// Run IUPred on every record, one prediction table per FastA file
    Predict {
        /// Directory of FastA files
        input_dir: PathBuf,
        /// IUPred prediction type [short|long] (or just s|l)
        #[arg(hide_possible_values = true)]
        mode: PredictionMode,
        /// File name pattern [default: *_nr100.fasta]
        pattern: Option<String>,
        /// IUPred installation directory [default: ./software/iupred/]
        predictor_dir: Option<PathBuf>,
    },

    /// Compute per-protein disorder fractions from prediction tables
    Disfrac {
        /// Directory of prediction tables
        input_dir: PathBuf,
        /// Output directory
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// File name pattern
        #[arg(default_value = DEFAULT_TABLE_PATTERN)]
        pattern: String,
        /// Disorder score threshold, within [0, 1] [default: 0.4]
        #[arg(value_parser = parse_threshold)]
        threshold: Option<f64>,
    },

    /// Map proteins and taxa, then run IUPred (map + taxon + predict)
    All {
        /// Directory of FastA files
        input_dir: PathBuf,
        /// IUPred prediction type [short|long]
        #[arg(hide_possible_values = true)]
        mode: PredictionMode,
    },
}

fn parse_threshold(arg: &str) -> Result<f64, String> {
    let t: f64 = arg.parse().map_err(|e| format!("{}", e))?;
    check_threshold(t).map_err(|e| e.to_string())
}

fn load_config() -> PipelineConfig {
    let Some(path) = find_config() else {
        return PipelineConfig::default();
    };
    match PipelineConfig::from_file(&path) {
        Ok(config) => {
            info!("Using settings from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Error reading {}: {}; using defaults", path.display(), e);
            PipelineConfig::default()
        }
    }
}

fn map_all(input_dir: &Path, pattern: &str) -> Result<(), PipelineError> {
    let (id_map, out_dir) = map_prot_fasta(input_dir, pattern)?;
    info!("Mapped {} FASTA files into {}", id_map.len(), out_dir.display());
    let (taxa, out_dir) = map_prot_taxon(input_dir, pattern)?;
    info!("Mapped {} proteins to taxa into {}", taxa.len(), out_dir.display());
    Ok(())
}

fn dispatch(command: PipelineCommand, config: &PipelineConfig) -> Result<(), PipelineError> {
    match command {
        PipelineCommand::Map { input_dir, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(config.fasta_pattern());
            let (id_map, out_dir) = map_prot_fasta(&input_dir, pattern)?;
            info!("Mapped {} FASTA files into {}", id_map.len(), out_dir.display());
        }
        PipelineCommand::Taxon { input_dir, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(config.fasta_pattern());
            let (taxa, out_dir) = map_prot_taxon(&input_dir, pattern)?;
            info!("Mapped {} proteins to taxa into {}", taxa.len(), out_dir.display());
        }
        PipelineCommand::Predict {
            input_dir,
            mode,
            pattern,
            predictor_dir,
        } => {
            let pattern = pattern.as_deref().unwrap_or(config.fasta_pattern());
            let predictor =
                Predictor::from_dir(predictor_dir.unwrap_or_else(|| config.predictor_dir()));
            let tables = run_predictions(&input_dir, mode, pattern, &predictor)?;
            info!("Wrote {} prediction tables", tables.len());
        }
        PipelineCommand::Disfrac {
            input_dir,
            output_dir,
            pattern,
            threshold,
        } => {
            let threshold = threshold.unwrap_or(config.threshold());
            let summaries = calc_disfrac(&input_dir, &output_dir, &pattern, threshold)?;
            info!("Wrote {} disorder fraction tables", summaries.len());
        }
        PipelineCommand::All { input_dir, mode } => {
            let pattern = config.fasta_pattern();
            map_all(&input_dir, pattern)?;
            let predictor = Predictor::from_dir(config.predictor_dir());
            let tables = run_predictions(&input_dir, mode, pattern, &predictor)?;
            info!("Wrote {} prediction tables", tables.len());
        }
    }
    Ok(())
}

pub fn run() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting log");

    let cli = Cli::parse();
    let config = load_config();
    dispatch(cli.command, &config)
}
