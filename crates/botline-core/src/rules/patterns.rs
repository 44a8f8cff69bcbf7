//! Fixed keyword and regex lists used by the rule engine.

use std::sync::LazyLock;

use regex::Regex;

/// Messages shorter than this (in characters, after trimming) count as greetings.
pub const MIN_MESSAGE_CHARS: usize = 5;

/// Whole-message greeting tokens, compared after lowercasing.
const GREETING_TOKENS: &[&str] = &[
    "hi",
    "hii",
    "hiii",
    "hello",
    "helo",
    "hlo",
    "hey",
    "heyy",
    "hola",
    "namaste",
    "namaskar",
    "good morning",
    "good afternoon",
    "good evening",
    "gm",
    "ok",
    "okay",
    "hmm",
];

static THREAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(come to your (home|house|office|place)|visit(ing)? your (home|house|office|place)|your (doorstep|workplace)|legal action|police|arrest(ed)?|jail|court|warrant|fir|field (visit|agent|team)|consequences|your (family|relatives|neighbou?rs|colleagues)|defaulter|blacklist(ed)?|seize|seizure)\b",
    )
    .expect("threat pattern is valid")
});

static BANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(hdfc|icici|sbi|state bank|axis|kotak|yes bank|idfc|indusind|bajaj|rbl|bank of baroda|pnb|punjab national|canara|union bank|citi(bank)?|hsbc|standard chartered|federal bank|au small finance|tata capital|home credit)\b",
    )
    .expect("bank pattern is valid")
});

static AFFIRMATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yes|yeah|yep|yup|sure|ok|okay|pls|plz|please|send( it)?|share( it)?|haan)\b")
        .expect("affirmative pattern is valid")
});

/// Fewer than [`MIN_MESSAGE_CHARS`] characters after trimming.
pub fn is_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_MESSAGE_CHARS
}

/// The whole message is a greeting token, ignoring case and trailing punctuation.
pub fn is_greeting_token(text: &str) -> bool {
    let normalized = text
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_lowercase();
    GREETING_TOKENS.contains(&normalized.as_str())
}

/// Coercive or threatening language.
pub fn is_threat(text: &str) -> bool {
    THREAT.is_match(text)
}

/// Mentions a recognised lending institution.
pub fn mentions_bank(text: &str) -> bool {
    BANK.is_match(text)
}

/// Agrees to receive the documents.
pub fn is_affirmative(text: &str) -> bool {
    AFFIRMATIVE.is_match(text)
}
