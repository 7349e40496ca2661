//! Natural-language normalization
//!
//! Turns sentences such as "what is the square root of 25?" into canonical
//! expressions (`sqrt(25)`). Stages run in a fixed order and each one only
//! consumes words the later stages no longer need:
//!
//! 1. lowercase, strip punctuation and filler words
//! 2. operator words (`plus`, `divided by`, `power`, ...)
//! 3. function phrases followed by a number (`square root 25`, `cosine 60 degrees`)
//! 4. drop leftover `to` / `degrees`, collapse whitespace
//! 5. reject empty or unparseable output

use crate::functions::degrees_to_radians;
use crate::{parse, CalcError, CalcResult, FunctionTable, ResourceLimits};
use regex::{Captures, Regex};
use std::sync::Arc;
use tracing::debug;

/// Phrases that mark a line as a natural-language calculation
pub const MATH_KEYWORDS: [&str; 16] = [
    "plus",
    "minus",
    "times",
    "divided by",
    "log of",
    "sqrt of",
    "sin of",
    "cos of",
    "tan of",
    "power",
    "factorial",
    "absolute value",
    "square root",
    "sine",
    "cosine",
    "tangent",
];

const FILLER_WORDS: [&str; 8] = [
    "calculate", "the", "of", "please", "compute", "find", "value", "result",
];

const NUMBER: &str = r"(-?(?:\d+(?:\.\d*)?|\.\d+))";

/// Report whether `text` contains any natural-language math keyword
pub fn is_math_question(text: &str) -> bool {
    let text = text.to_lowercase();
    MATH_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

#[derive(Debug, Clone)]
pub struct Canonicalizer {
    table: Arc<FunctionTable>,
    limits: ResourceLimits,
    operator_words: Vec<(Regex, &'static str)>,
    function_phrases: Vec<(Regex, &'static str)>,
    trig_phrase: Regex,
    residue: Regex,
    whitespace: Regex,
}

impl Canonicalizer {
    pub fn new(table: Arc<FunctionTable>, limits: ResourceLimits) -> Self {
        let operator_words = [
            (r"\bsum of (\S+) and (\S+)", "${1} + ${2}"),
            (r"\bproduct of (\S+) and (\S+)", "${1} * ${2}"),
            (r"\bsum of\b", "+"),
            (r"\bproduct of\b", "*"),
            (r"\bdivided by\b", "/"),
            (r"\bplus\b", "+"),
            (r"\bminus\b", "-"),
            (r"\btimes\b", "*"),
            (r"\bpower\b", "^"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (compile(pattern), replacement))
        .collect();

        let function_phrases = [
            (format!(r"\bsquare root\s*{}", NUMBER), "sqrt(${1})"),
            (format!(r"\bsqrt\s*{}", NUMBER), "sqrt(${1})"),
            (format!(r"\blog\s*{}", NUMBER), "log(${1})"),
            (r"\bfactorial\s*(\d+)".to_string(), "factorial(${1})"),
            (
                format!(r"\babsolute(?:\s+value)?\s*{}", NUMBER),
                "abs(${1})",
            ),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (compile(&pattern), replacement))
        .collect();

        Self {
            table,
            limits,
            operator_words,
            function_phrases,
            trig_phrase: compile(&format!(
                r"\b(sine|sin|cosine|cos|tangent|tan)\s*{}",
                NUMBER
            )),
            residue: compile(r"\b(?:to|degrees?)\b"),
            whitespace: compile(r"\s+"),
        }
    }

    /// Convert an English sentence into a canonical expression
    pub fn normalize(&self, sentence: &str) -> CalcResult<String> {
        let text = strip_fillers(sentence);
        debug!(text = %text, "after removing filler words and punctuation");

        let text = self.substitute_operators(&text);
        debug!(text = %text, "after replacing operator words");

        let text = self.rewrite_functions(&text);
        debug!(text = %text, "after rewriting function phrases");

        let text = self.residue.replace_all(&text, "");
        let text = self.whitespace.replace_all(&text, " ").trim().to_string();
        debug!(text = %text, "canonical expression");

        if text.is_empty() {
            return Err(CalcError::ConversionError(format!(
                "nothing left to evaluate in '{}'. Check the input for unsupported phrases.",
                sentence.trim()
            )));
        }

        parse(&text, &self.table, &self.limits).map_err(|e| {
            CalcError::ConversionError(format!(
                "'{}' is not a valid math expression ({})",
                text, e
            ))
        })?;

        Ok(text)
    }

    fn substitute_operators(&self, text: &str) -> String {
        self.operator_words
            .iter()
            .fold(text.to_string(), |acc, (pattern, replacement)| {
                pattern.replace_all(&acc, *replacement).into_owned()
            })
    }

    fn rewrite_functions(&self, text: &str) -> String {
        let text = self
            .function_phrases
            .iter()
            .fold(text.to_string(), |acc, (pattern, replacement)| {
                pattern.replace_all(&acc, *replacement).into_owned()
            });

        let in_degrees = text.contains("degree");
        self.trig_phrase
            .replace_all(&text, |caps: &Captures| {
                let function = match &caps[1] {
                    "sine" | "sin" => "sin",
                    "cosine" | "cos" => "cos",
                    _ => "tan",
                };
                let argument = match (in_degrees, caps[2].parse::<f64>()) {
                    (true, Ok(degrees)) => degrees_to_radians(degrees).to_string(),
                    _ => caps[2].to_string(),
                };
                format!("{}({})", function, argument)
            })
            .into_owned()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("canonicalizer pattern is valid")
}

/// Lowercase, drop `? , !` and sentence-ending dots, and remove filler words
///
/// `of` survives directly after `sum` or `product` so those phrases can still
/// be recognized.
fn strip_fillers(sentence: &str) -> String {
    let lowered = sentence.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut cleaned = String::with_capacity(chars.len());
    for (i, c) in chars.iter().enumerate() {
        match c {
            '?' | ',' | '!' => {}
            '.' if !chars.get(i + 1).is_some_and(|next| next.is_ascii_digit()) => {}
            _ => cleaned.push(*c),
        }
    }

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let word = words[i];
        if word == "what" && words.get(i + 1) == Some(&"is") {
            i += 2;
            continue;
        }
        let keeps_of = word == "of" && matches!(kept.last(), Some(&"sum") | Some(&"product"));
        if !FILLER_WORDS.contains(&word) || keeps_of {
            kept.push(word);
        }
        i += 1;
    }
    kept.join(" ")
}
