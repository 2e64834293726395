//! Pulls the JSON object out of raw model text.
//!
//! Models like to wrap JSON in a fenced markdown block, and the less careful
//! ones emit JavaScript-style object literals. The strict mode accepts only
//! real JSON; the lenient mode repairs the usual deviations first.

use serde_json::Value;

use crate::errors::{AppError, AppResult};

const FENCE: &str = "```";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractionMode {
    Strict,
    Lenient,
}

/// Removes a leading fence (optionally tagged `json`) and a trailing fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

pub fn extract_json(raw: &str, mode: ExtractionMode) -> AppResult<Value> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(AppError::MalformedAiOutput(
            "no JSON content after removing code fences".to_string(),
        ));
    }

    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(strict_err) if mode == ExtractionMode::Lenient => {
            log::debug!("Strict JSON parse failed ({}), retrying leniently", strict_err);
            serde_json::from_str(&relax_json(body))
                .map_err(|err| AppError::MalformedAiOutput(err.to_string()))
        }
        Err(err) => Err(AppError::MalformedAiOutput(err.to_string())),
    }
}

/// Rewrites JavaScript-style object literals into JSON: bare keys get
/// quoted, trailing commas are dropped and single-quoted strings become
/// double-quoted. Content inside strings is never touched.
fn relax_json(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 16);
    let mut last_significant: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                i = copy_string(&chars, i, &mut out);
                last_significant = Some('"');
                continue;
            }
            ',' => {
                let next = next_significant(&chars, i + 1);
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                    last_significant = Some(',');
                }
            }
            c if is_ident_start(c) && matches!(last_significant, Some('{') | Some(',')) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                if next_significant(&chars, i) == Some(':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
                last_significant = ident.chars().last();
                continue;
            }
            c => {
                out.push(c);
                if !c.is_whitespace() {
                    last_significant = Some(c);
                }
            }
        }
        i += 1;
    }

    out
}

/// Copies the string literal starting at `start` as a double-quoted JSON
/// string and returns the index just past its closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    out.push('"');

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            match chars.get(i + 1) {
                // \' is not a valid JSON escape
                Some('\'') => out.push('\''),
                Some(&escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            }
            i += 2;
            continue;
        }
        if c == quote {
            out.push('"');
            return i + 1;
        }
        if c == '"' {
            out.push_str("\\\"");
        } else {
            out.push(c);
        }
        i += 1;
    }

    i
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .copied()
        .find(|c| !c.is_whitespace())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
