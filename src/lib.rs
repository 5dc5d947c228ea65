// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

pub mod config;
pub mod disfrac;
pub mod errors;
pub mod inputs;
pub mod mapping;
pub mod predict;
mod runner;
pub mod seq;
pub mod table;

use crate::errors::PipelineError;

pub fn run() -> Result<(), PipelineError> {
    runner::run()
}
