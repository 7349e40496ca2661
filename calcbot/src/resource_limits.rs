use serde::{Deserialize, Serialize};

/// Resource limits to keep a single line of input cheap to process
///
/// These limits protect against pathological inputs while being generous
/// enough for anything a person would type at a calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    /// Maximum size of one input line in bytes
    /// Real usage: ~50 bytes, Limit: 4KB
    pub max_input_bytes: usize,

    /// Maximum expression nesting depth
    /// Real usage: ~3 levels, Limit: 100 (30x+)
    pub max_expression_depth: usize,

    /// Maximum time the symbolic backend may spend on one request
    pub backend_timeout_ms: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 4 * 1024, // 4 KB
            max_expression_depth: 100,
            backend_timeout_ms: 5000, // 5 seconds
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
