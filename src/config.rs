//! Engine sizing and search knobs.
//!
//! No file or wire format is implied: the core has no I/O surface, so this
//! is a plain struct with a `Default` impl rather than a deserialized
//! config file.

/// Tunable sizes and depths for an [`crate::engine::Engine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Size of the main transposition table, in megabytes.
    pub tt_size_mb: usize,
    /// Size of the VCF quiescence transposition table, in megabytes.
    pub vcf_tt_size_mb: usize,
    /// Maximum iterative-deepening depth for the main search.
    pub limit_depth: i32,
    /// Maximum recursion depth for VCF quiescence.
    pub vcf_depth: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_size_mb: 16,
            vcf_tt_size_mb: 16,
            limit_depth: 12,
            vcf_depth: 225,
        }
    }
}
