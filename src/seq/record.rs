// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// A FastA record: the header line (without the leading '>') and the raw sequence. UniProt-style
// headers look like
//
//   sp|P0A7Z4|RPOA_ECOLI DNA-directed RNA polymerase subunit alpha OS=Escherichia coli OX=83333
//
// and carry both the protein identifier (2nd '|' field) and the taxon (OX= token).

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct SeqRecord {
    pub header: String,
    pub sequence: String,
}

fn taxon_re() -> &'static Regex {
    static TAXON_RE: OnceLock<Regex> = OnceLock::new();
    TAXON_RE.get_or_init(|| Regex::new(r"(?:^|\s)OX=(\S*)").expect("valid taxon regex"))
}

impl SeqRecord {
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        SeqRecord {
            header: header.into(),
            sequence: sequence.into(),
        }
    }

    /// First whitespace-delimited token of the header.
    pub fn id(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        &self.header
    }

    /// The protein identifier: the second '|'-separated field of the id (`xx|ID|xx`), or the
    /// whole id if it contains no '|'.
    pub fn record_id(&self) -> &str {
        let id = self.id();
        id.split('|').nth(1).unwrap_or(id)
    }

    /// Value of the first `OX=` token of the description, if any. A bare `OX=` gives `""`.
    pub fn taxon(&self) -> Option<&str> {
        taxon_re()
            .captures(self.description())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_piped() {
        let rec = SeqRecord::new("sp|P0A7Z4|RPOA_ECOLI RNA polymerase OX=83333", "MQG");
        assert_eq!(rec.id(), "sp|P0A7Z4|RPOA_ECOLI");
        assert_eq!(rec.record_id(), "P0A7Z4");
    }

    #[test]
    fn test_record_id_no_pipe() {
        let rec = SeqRecord::new("recordX description", "MQG");
        assert_eq!(rec.record_id(), "recordX");
    }

    #[test]
    fn test_record_id_single_pipe() {
        // 'ab|' splits into ["ab", ""]: the 2nd field exists but is empty.
        let rec = SeqRecord::new("ab|", "M");
        assert_eq!(rec.record_id(), "");
        let rec = SeqRecord::new("tr|Q9XYZ1", "M");
        assert_eq!(rec.record_id(), "Q9XYZ1");
    }

    #[test]
    fn test_taxon() {
        let rec = SeqRecord::new("sp|P1|X_Y Some protein OS=Foo bar OX=562 GN=abc", "M");
        assert_eq!(rec.taxon(), Some("562"));
    }

    #[test]
    fn test_taxon_absent() {
        let rec = SeqRecord::new("sp|P1|X_Y Some protein OS=Foo", "M");
        assert_eq!(rec.taxon(), None);
        // Must be a whole token, not a suffix of another one.
        let rec = SeqRecord::new("sp|P1|X_Y BOX=12", "M");
        assert_eq!(rec.taxon(), None);
    }

    #[test]
    fn test_taxon_empty_value() {
        let rec = SeqRecord::new("sp|P1|X_Y Some protein OX= GN=a", "M");
        assert_eq!(rec.taxon(), Some(""));
        let rec = SeqRecord::new("sp|P1|X_Y Some protein OX=", "M");
        assert_eq!(rec.taxon(), Some(""));
    }

    #[test]
    fn test_len() {
        let rec = SeqRecord::new("r", "MKVL");
        assert_eq!(rec.len(), 4);
        assert!(!rec.is_empty());
    }
}
