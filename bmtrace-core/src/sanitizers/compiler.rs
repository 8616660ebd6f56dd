//! compiler.rs - Compiles trace redaction rules.
//!
//! A [`TraceRule`] describes one redaction as plain data: a pattern, a
//! replacement template (`${1}`-style capture references) and the regex
//! flags it needs. [`compile_rules`] turns a list of them into a
//! [`CompiledRules`] set that the sanitizer applies in order.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::TraceError;

/// A single redaction rule, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRule {
    /// Unique identifier for the rule (e.g., "auth_header").
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Replacement template; `${n}` refers to capture group `n`.
    pub replace_with: String,
    /// If true, `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// If true, letters match regardless of case.
    pub case_insensitive: bool,
}

/// A single compiled redaction rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The string to replace matches of this rule's pattern with.
    pub replace_with: String,
    /// The unique name of the redaction rule.
    pub name: String,
}

/// An ordered collection of compiled rules.
///
/// Order matters: each rule runs over the output of the one before it.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

/// Compiles a list of `TraceRule`s, keeping their order.
///
/// Every rule is attempted; if any fail, the error names all of them.
pub fn compile_rules(rules_to_compile: Vec<TraceRule>) -> Result<CompiledRules, TraceError> {
    debug!("Starting compilation of {} trace rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        let regex_result = RegexBuilder::new(&rule.pattern)
            .multi_line(rule.multiline)
            .case_insensitive(rule.case_insensitive)
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Trace rule '{}' compiled successfully.", &rule.name);
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with,
                    name: rule.name,
                });
            }
            Err(e) => compilation_errors.push(TraceError::RuleCompilation(rule.name, e)),
        }
    }

    match compilation_errors.len() {
        0 => Ok(CompiledRules { rules: compiled_rules }),
        1 => Err(compilation_errors.remove(0)),
        count => {
            let details = compilation_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("\n");
            Err(TraceError::RuleSet { count, details })
        }
    }
}
