// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

// Two small proteomes. SALTY's first header carries no '|' and no taxon.
pub const ECOLI_FASTA: &str = "\
>sp|P0A8V2|RL32_ECOLI 50S ribosomal protein L32 OS=Escherichia coli OX=83333 GN=rpmF
MAVQQNKPTRSKRGMRRSHDALTAVTSLSVDKTSGEKHLRHHITADGYYRGRKVIAK
>sp|P0A7Z4|RPOA_ECOLI RNA polymerase subunit alpha OS=Escherichia coli OX=83333 GN=rpoA
MQGSVTEFLKPRLVDIEQVSSTHAKVTLEPLERGFGHTLGNALRRILLSSMPGCAVTEVE
IDGVLHEYSTKEGVQEDI
";

pub const SALTY_FASTA: &str = "\
>orphan1 hypothetical protein
MSTNPKPQRKTKRNTNRRPQDVKFPGG
>tr|Q8ZLE2|Q8ZLE2_SALTY Uncharacterized protein OS=Salmonella typhimurium OX=99287
MDEKSSPEEL
";

/// A scratch area holding `fastas/` with the two proteomes above, plus a file that doesn't
/// match the default pattern.
#[allow(dead_code)]
pub fn fasta_rig() -> (TempDir, PathBuf) {
    let root = tempfile::tempdir().expect("tempdir");
    let input_dir = root.path().join("fastas");
    fs::create_dir(&input_dir).expect("mkdir");
    fs::write(input_dir.join("ECOLI_nr100.fasta"), ECOLI_FASTA).expect("write");
    fs::write(input_dir.join("SALTY_nr100.fasta"), SALTY_FASTA).expect("write");
    fs::write(input_dir.join("notes.txt"), "not a fasta").expect("write");
    (root, input_dir)
}

// Scores every residue but the last `drop` ones.
#[allow(dead_code)]
const FAKE_PREDICTOR: &str = r##"#!/bin/sh
[ -n "$IUPred_PATH" ] || exit 3
case "$2" in
    short|long) ;;
    *) exit 4 ;;
esac
echo "# IUPred"
echo "# Prediction output"
awk -v drop=0 '!/^>/ { s = s $0 }
END {
    for (i = 1; i <= length(s) - drop; i++) {
        c = substr(s, i, 1)
        printf "%5d %s     %.4f\n", i, c, (c ~ /[DEKPSQ]/) ? 0.8 : 0.1
    }
}' "$1"
"##;

#[cfg(unix)]
fn install_script(dir: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).expect("mkdir");
    let exe = dir.join("iupred");
    fs::write(&exe, script).expect("write script");
    let mut perms = fs::metadata(&exe).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&exe, perms).expect("chmod");
    exe
}

/// Installs a stand-in for IUPred in `dir`: it prints a comment header and one
/// `position residue score` line per residue, scoring D, E, K, P, S and Q as disordered (0.8)
/// and everything else as ordered (0.1). It fails unless IUPred_PATH is set and the mode is
/// short or long.
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_fake_predictor(dir: &Path) -> PathBuf {
    install_script(dir, FAKE_PREDICTOR)
}

/// Like `install_fake_predictor`, but leaves out the last residue of every sequence.
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_truncating_predictor(dir: &Path) -> PathBuf {
    install_script(dir, &FAKE_PREDICTOR.replacen("-v drop=0", "-v drop=1", 1))
}

/// A stand-in that always fails.
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_failing_predictor(dir: &Path) -> PathBuf {
    install_script(dir, "#!/bin/sh\necho 'boom' >&2\nexit 1\n")
}

/// Expected fake-predictor disorder fraction for a sequence at threshold 0.4.
#[allow(dead_code)]
pub fn expected_fraction(seq: &str) -> f64 {
    let disordered = seq.chars().filter(|c| "DEKPSQ".contains(*c)).count();
    disordered as f64 / seq.chars().count() as f64
}
