// ⚙️ Pipeline configuration
// Fixed paths for the binary; overridable from library code and tests

use std::path::PathBuf;

/// Directory holding the per-period Spendee exports
pub const DEFAULT_INPUT_DIR: &str = "data/spendee/";

/// Consolidated output file
pub const DEFAULT_OUTPUT_PATH: &str = "data/cleaned/spendee.csv";

/// What to do when the input directory holds no files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyInputPolicy {
    /// Abort the run with `CleanError::NoInputFiles`
    #[default]
    Fail,

    /// Write an output file containing only the header row
    WriteHeaderOnly,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub empty_input: EmptyInputPolicy,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            empty_input: EmptyInputPolicy::default(),
        }
    }

    /// Builder pattern: set the empty-input policy
    pub fn with_empty_input(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH)
    }
}
