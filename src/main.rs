// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use disorder_pipeline::errors::PipelineError;

fn main() -> Result<(), PipelineError> {
    disorder_pipeline::run()
}
