//! In-memory FASTA rendering of mutated sequences. Writing to disk is left to
//! the caller.

use super::MutatedSequence;
use std::fmt::Write;

pub const DEFAULT_LINE_WIDTH: usize = 60;

impl MutatedSequence {
    /// Header line without the leading '>'
    pub fn fasta_header(&self, record_id: &str) -> String {
        let mut header = format!(
            "{} gene={} locus={} allele={}",
            record_id, self.gene, self.locus, self.applied_allele
        );
        if let Some(carried) = &self.carried_allele {
            let _ = write!(header, " carried={}", carried);
        }
        let _ = write!(header, " length={} edits={}", self.sequence.len(), self.edits.len());
        if self.length_changed {
            header.push_str(" indel");
        }
        header
    }

    /// Render one record, wrapping the sequence at `width` columns
    /// (`DEFAULT_LINE_WIDTH` when zero)
    pub fn to_fasta(&self, record_id: &str, width: usize) -> String {
        let width = if width == 0 { DEFAULT_LINE_WIDTH } else { width };
        let mut out = String::with_capacity(self.sequence.len() + self.sequence.len() / width + 80);
        out.push('>');
        out.push_str(&self.fasta_header(record_id));
        out.push('\n');
        for line in self.sequence.as_bytes().chunks(width) {
            out.push_str(&String::from_utf8_lossy(line));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{AlleleOrigin, SequenceEdit};

    fn sample(sequence: &str) -> MutatedSequence {
        MutatedSequence {
            gene: "MC1R".to_string(),
            locus: "E".to_string(),
            applied_allele: "e".to_string(),
            carried_allele: None,
            origin: AlleleOrigin::Both,
            sequence: sequence.to_string(),
            template_length: sequence.len(),
            edits: vec![SequenceEdit::substitution(2, 'C', 'T')],
            length_changed: false,
        }
    }

    #[test]
    fn test_fasta_wraps_lines() {
        let record = sample("ACGTACGTAC").to_fasta("pup1", 4);
        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines[0], ">pup1 gene=MC1R locus=E allele=e length=10 edits=1");
        assert_eq!(&lines[1..], &["ACGT", "ACGT", "AC"]);
    }

    #[test]
    fn test_fasta_default_width() {
        let seq = "A".repeat(130);
        let record = sample(&seq).to_fasta("pup1", 0);
        let widths: Vec<usize> = record.lines().skip(1).map(str::len).collect();
        assert_eq!(widths, vec![60, 60, 10]);
    }

    #[test]
    fn test_fasta_header_marks_carrier_and_indel() {
        let mut seq = sample("ACG");
        seq.carried_allele = Some("E".to_string());
        seq.length_changed = true;
        assert!(seq.fasta_header("x").ends_with("carried=E length=3 edits=1 indel"));
    }
}
