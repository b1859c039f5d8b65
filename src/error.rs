//! Error taxonomy for the genetics core
//!
//! Every variant is propagated to the caller. Nothing in the crate swallows an
//! error and substitutes a default allele, colour or sequence.

/// Errors raised by the locus model, cross engine, resolvers and sampler
#[derive(Debug, thiserror::Error)]
pub enum GeneticsError {
    #[error("Unknown locus: {0}")]
    UnknownLocus(String),

    #[error("Unknown allele '{allele}' at locus {locus}")]
    UnknownAllele { locus: String, allele: String },

    #[error("Genotype '{owner}' is missing locus {locus}")]
    IncompleteGenotype { owner: String, locus: String },

    #[error(
        "Template mismatch in {gene} at position {position}: expected '{expected}', found '{actual}'"
    )]
    TemplateMismatch {
        gene: String,
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Overlapping edits for allele {allele} in {gene}: position {first} and position {second}")]
    OverlappingEdit {
        gene: String,
        allele: String,
        first: usize,
        second: usize,
    },

    #[error("Invalid edit for allele {allele} in {gene} at position {position}: {reason}")]
    InvalidEdit {
        gene: String,
        allele: String,
        position: usize,
        reason: String,
    },

    #[error("Invalid template for {gene}: {reason}")]
    InvalidTemplate { gene: String, reason: String },

    #[error("No template sequence loaded for gene {0}")]
    MissingTemplate(String),

    #[error("Unknown breed: {0}")]
    UnknownBreed(String),

    #[error("Invalid locus table: {0}")]
    InvalidLocusTable(String),

    #[error("Invalid mutation table: {0}")]
    InvalidMutationTable(String),

    #[error("Sequence references were requested but none are loaded")]
    ReferenceUnavailable,

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_mismatch_message() {
        let err = GeneticsError::TemplateMismatch {
            gene: "MC1R".into(),
            position: 916,
            expected: "C".into(),
            actual: "G".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MC1R"));
        assert!(msg.contains("916"));
        assert!(msg.contains("expected 'C', found 'G'"));
    }

    #[test]
    fn test_config_error_from_serde() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: GeneticsError = parse.unwrap_err().into();
        assert!(matches!(err, GeneticsError::Config(_)));
    }
}
