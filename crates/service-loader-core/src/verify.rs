//! Accept/reject gate between the computed and the expected digest.

/// How two hex digests are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestComparison {
    /// Byte-for-byte equality. Both sides are expected to be lowercase hex.
    #[default]
    Exact,
    /// ASCII case folded before comparing, for checksum files written in uppercase.
    IgnoreAsciiCase,
}

/// Outcome of comparing digests. `Fail` is terminal for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Pass,
    Fail { expected: String, actual: String },
}

impl Verification {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verification::Pass)
    }
}

/// Compare `computed` against `expected`. No partial or fuzzy matches.
pub fn verify(computed: &str, expected: &str, comparison: DigestComparison) -> Verification {
    let equal = match comparison {
        DigestComparison::Exact => computed == expected,
        DigestComparison::IgnoreAsciiCase => computed.eq_ignore_ascii_case(expected),
    };
    if equal {
        Verification::Pass
    } else {
        Verification::Fail {
            expected: expected.to_string(),
            actual: computed.to_string(),
        }
    }
}
