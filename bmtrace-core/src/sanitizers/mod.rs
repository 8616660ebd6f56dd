//! Credential redaction for trace text.
//!
//! Trace output often contains raw HTTP exchanges. Before a caller hands such
//! text to a sink it runs it through [`sanitize`], which applies three rules
//! in order, each to the output of the previous one:
//!
//! 1. `auth_header`: the value of any line starting with `Authorization:` or
//!    `X-Auth...:` (case-sensitive, anchored at line start).
//! 2. `secret_param`: `password=`, `token=`, `apikey=` and `passcode=` values
//!    in query strings and form bodies, up to the next `&` or the end of text.
//! 3. `secret_json_field`: quoted JSON values whose key contains `password`,
//!    `token` or `apikey`, unless an `_` follows the keyword inside the key
//!    (so `password_hint` is left alone).
//!
//! Matching is best-effort and regex-based. Whitespace in the patterns means
//! ASCII whitespace only (tab, newline, form feed, carriage return, space).

pub mod compiler;

use std::borrow::Cow;

use log::debug;
use once_cell::sync::Lazy;

use crate::errors::TraceError;
use self::compiler::{compile_rules, CompiledRules, TraceRule};

/// Text substituted for every redacted value.
pub const PRIVATE_DATA_PLACEHOLDER: &str = "[PRIVATE DATA HIDDEN]";

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(|| {
    Sanitizer::new(default_rules()).expect("built-in trace rules must compile")
});

/// The built-in rule table, in application order.
pub fn default_rules() -> Vec<TraceRule> {
    vec![
        TraceRule {
            name: "auth_header".to_string(),
            pattern: r"^(Authorization|X-Auth[^\t\n\f\r ]*): .*".to_string(),
            replace_with: format!("${{1}}: {}", PRIVATE_DATA_PLACEHOLDER),
            multiline: true,
            case_insensitive: false,
        },
        TraceRule {
            name: "secret_param".to_string(),
            pattern: r"(password|token|apikey|passcode)=[^&]*(&|$)".to_string(),
            replace_with: format!("${{1}}={}${{2}}", PRIVATE_DATA_PLACEHOLDER),
            multiline: false,
            case_insensitive: true,
        },
        TraceRule {
            name: "secret_json_field".to_string(),
            pattern: r#""([^"]*(password|token|apikey)[^"_]*)":[\t\n\f\r ]*"[^,]*""#.to_string(),
            replace_with: format!(r#""${{1}}":"{}""#, PRIVATE_DATA_PLACEHOLDER),
            multiline: false,
            case_insensitive: true,
        },
    ]
}

/// How many spans one rule replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
}

/// An ordered set of compiled redaction rules.
#[derive(Debug)]
pub struct Sanitizer {
    compiled: CompiledRules,
}

impl Sanitizer {
    pub fn new(rules: Vec<TraceRule>) -> Result<Self, TraceError> {
        Ok(Self {
            compiled: compile_rules(rules)?,
        })
    }

    /// The sanitizer built from [`default_rules`], compiled on first use.
    pub fn builtin() -> &'static Sanitizer {
        &DEFAULT_SANITIZER
    }

    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled
    }

    /// Applies every rule in order and returns the redacted copy.
    pub fn sanitize(&self, input: &str) -> String {
        let mut text = Cow::Borrowed(input);
        for rule in &self.compiled.rules {
            let replaced = match rule.regex.replace_all(&text, rule.replace_with.as_str()) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                text = Cow::Owned(replaced);
            }
        }
        text.into_owned()
    }

    /// Like [`Sanitizer::sanitize`], also reporting how many spans each rule
    /// replaced. Rules that matched nothing are omitted.
    pub fn sanitize_with_summary(&self, input: &str) -> (String, Vec<RedactionSummaryItem>) {
        let mut text = input.to_string();
        let mut summary = Vec::new();
        for rule in &self.compiled.rules {
            let occurrences = rule.regex.find_iter(&text).count();
            if occurrences == 0 {
                continue;
            }
            debug!("Trace rule '{}' redacted {} value(s).", rule.name, occurrences);
            text = rule.regex.replace_all(&text, rule.replace_with.as_str()).into_owned();
            summary.push(RedactionSummaryItem {
                rule_name: rule.name.clone(),
                occurrences,
            });
        }
        (text, summary)
    }
}

/// Returns `input` with credentials replaced by [`PRIVATE_DATA_PLACEHOLDER`],
/// using the built-in rules.
pub fn sanitize(input: &str) -> String {
    Sanitizer::builtin().sanitize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile_in_order() {
        let names: Vec<&str> = Sanitizer::builtin()
            .compiled_rules()
            .rules
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["auth_header", "secret_param", "secret_json_field"]);
    }

    #[test]
    fn test_clean_text_is_returned_unchanged() {
        let input = "GET /v2/info HTTP/1.1\nHost: api.example.com\n";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_summary_counts_each_rule() {
        let input = "Authorization: Bearer x\nX-Auth-Token: y\nbody: token=a&apikey=b";
        let (out, summary) = Sanitizer::builtin().sanitize_with_summary(input);
        assert_eq!(out, sanitize(input));
        assert_eq!(
            summary,
            vec![
                RedactionSummaryItem { rule_name: "auth_header".to_string(), occurrences: 2 },
                RedactionSummaryItem { rule_name: "secret_param".to_string(), occurrences: 2 },
            ]
        );
    }
}
