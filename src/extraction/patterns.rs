//! Built-in insight pattern table
//!
//! Each family lists its patterns in evaluation order. Patterns marked with
//! a capture take group 1 as the insight's key concept; the rest only
//! record the matched text.

use super::extractor::InsightType;

/// One entry of the pattern table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    /// Regex source, matched case-insensitively
    pub pattern: &'static str,
    /// Whether group 1 is the key concept
    pub has_capture: bool,
}

const fn concept(pattern: &'static str) -> PatternRule {
    PatternRule {
        pattern,
        has_capture: true,
    }
}

const fn presence(pattern: &'static str) -> PatternRule {
    PatternRule {
        pattern,
        has_capture: false,
    }
}

const ARCHITECTURE: &[PatternRule] = &[
    concept(r"I'll use (\w+) (?:pattern|architecture|approach)"),
    concept(r"This follows the (\w+) pattern"),
    concept(r"(?:Using|Implementing) (\w+) (?:pattern|architecture)"),
    concept(r"The (\w+) approach (?:ensures|provides|allows)"),
    concept(r"I'm implementing (\w+) to (?:handle|manage|ensure)"),
];

const TECHNOLOGY: &[PatternRule] = &[
    concept(r"I'll use (\w+(?:\.\w+)*) (?:library|framework|tool)"),
    concept(r"Using (\w+(?:\.\w+)*) for (?:this|the)"),
    concept(r"(?:Installing|Adding) (\w+) (?:package|dependency)"),
    concept(r"This requires (\w+(?:\.\w+)*) (?:to|for)"),
];

// The attack pattern has a group but security insights never carry a concept.
const SECURITY: &[PatternRule] = &[
    presence(r"(?:for security|security (?:reason|concern))"),
    presence(r"(?:to prevent|preventing) (\w+) (?:attack|vulnerability)"),
    presence(r"(?:authentication|authorization|validation|sanitization)"),
    presence(r"(?:HTTPS|SSL|TLS|encryption|hashing)"),
];

const PERFORMANCE: &[PatternRule] = &[
    presence(r"(?:for performance|performance (?:reason|optimization))"),
    concept(r"(?:to optimize|optimizing) (\w+)"),
    presence(r"(?:caching|indexing|lazy loading|pagination)"),
    presence(r"(?:async|asynchronous|concurrent|parallel) (?:processing|execution)"),
];

/// The full table in family evaluation order.
pub fn default_pattern_table() -> Vec<(InsightType, &'static [PatternRule])> {
    vec![
        (InsightType::Architecture, ARCHITECTURE),
        (InsightType::Technology, TECHNOLOGY),
        (InsightType::Security, SECURITY),
        (InsightType::Performance, PERFORMANCE),
    ]
}
