//! Shell command significance filter
//!
//! Routine navigation and inspection commands are noise; everything else is
//! worth classifying.

/// How an ignore rule matches the start of a trimmed command
#[derive(Debug, Clone, Copy)]
enum IgnoreRule {
    /// The whole command equals the token
    Exact(&'static str),
    /// The command starts with the token followed by a word boundary
    Word(&'static str),
}

const IGNORE_RULES: &[IgnoreRule] = &[
    IgnoreRule::Exact("npm install"),
    IgnoreRule::Exact("git status"),
    IgnoreRule::Word("ls"),
    IgnoreRule::Exact("pwd"),
    IgnoreRule::Word("cd"),
    IgnoreRule::Word("echo"),
    IgnoreRule::Word("cat"),
    IgnoreRule::Word("head"),
    IgnoreRule::Word("tail"),
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl IgnoreRule {
    fn matches(&self, command: &str) -> bool {
        match self {
            IgnoreRule::Exact(token) => command == *token,
            IgnoreRule::Word(token) => command
                .strip_prefix(token)
                .is_some_and(|rest| !rest.starts_with(is_word_char)),
        }
    }
}

/// Whether a shell command is worth turning into knowledge.
pub fn is_significant(command: &str) -> bool {
    let command = command.trim();
    !IGNORE_RULES.iter().any(|rule| rule.matches(command))
}
