//! Built-in language definitions
//!
//! Each language is described by two tables: multi-line constructs and
//! single-line patterns. `build` compiles them into a `LanguageDefinition`.

mod c;
mod markdown;
mod python;
mod rust;
mod toml_lang;

use super::language::LanguageDefinition;
use super::rules::{MultilineRule, PatternRule};
use super::tokens::TokenType;
use crate::error::Result;

/// A multi-line construct: name, open, close, token type, escape character
type MultilineSpec = (&'static str, &'static str, &'static str, TokenType, Option<char>);

/// A single-line rule: name, pattern, token type, priority
type PatternSpec = (&'static str, &'static str, TokenType, i32);

/// Compile a language from its rule tables
///
/// Multi-line state IDs are assigned in table order, starting at 1.
fn build(
    name: &str,
    aliases: &[&str],
    multiline: &[MultilineSpec],
    patterns: &[PatternSpec],
) -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new(name);
    for alias in aliases {
        lang.add_alias(alias);
    }
    for (id, (rule_name, open, close, token_type, escape)) in multiline.iter().enumerate() {
        let mut rule = MultilineRule::new(*rule_name, open, close, *token_type, id as u8 + 1)?;
        if let Some(escape) = escape {
            rule = rule.escaped_by(*escape);
        }
        lang.add_multiline(rule);
    }
    for (rule_name, pattern, token_type, priority) in patterns {
        lang.add_pattern(PatternRule::new(*rule_name, pattern, *token_type, *priority)?);
    }
    Ok(lang)
}

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    Ok(vec![
        rust::rust_language()?,
        c::c_language()?,
        python::python_language()?,
        toml_lang::toml_language()?,
        markdown::markdown_language()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_languages_compile() {
        let languages = all_languages().unwrap();
        let names: Vec<_> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "C", "Python", "TOML", "Markdown"]);
        for lang in &languages {
            assert!(!lang.patterns.is_empty(), "{} has no patterns", lang.name);
        }
    }

    #[test]
    fn test_build_assigns_state_ids() {
        let lang = build(
            "Demo",
            &["demo"],
            &[
                ("a", "<", ">", TokenType::String, None),
                ("b", "\\[", "\\]", TokenType::Comment, Some('\\')),
            ],
            &[],
        )
        .unwrap();
        let ids: Vec<u8> = lang.multiline_rules.iter().map(|r| r.state_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(lang.multiline_rules[1].escape_char, Some('\\'));
    }
}
