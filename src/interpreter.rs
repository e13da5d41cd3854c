//! Query interpretation
//!
//! Turns free text such as "I'm going to Bangalore, let's plan my trip" into a
//! [`QueryIntent`] and a place name. Both steps are keyword and capitalization
//! heuristics driven by the tables below.

use crate::models::QueryIntent;

/// Vocabulary that signals interest in the weather
pub const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "rain",
    "forecast",
    "hot",
    "cold",
    "climate",
    "temp",
];

/// Vocabulary that signals interest in things to visit
pub const PLACES_KEYWORDS: &[&str] = &[
    "visit",
    "places",
    "attractions",
    "see",
    "tour",
    "tourist",
    "sights",
    "destination",
    "spots",
    "things to do",
];

/// A prefix rule: one of `phrases`, then a run of capitalized words
#[derive(Debug, Clone, Copy)]
pub struct LocationRule {
    pub phrases: &'static [&'static str],
}

/// Prefix rules, tried in order; the first rule yielding a candidate wins
pub const LOCATION_RULES: &[LocationRule] = &[
    LocationRule {
        phrases: &["going to", "visit", "trip to", "travel to"],
    },
    LocationRule {
        phrases: &["in", "at"],
    },
];

/// Words that end a captured place name
pub const CONNECTOR_WORDS: &[&str] = &["let", "what", "and"];

/// Lowercase words allowed inside a multi-word place name
pub const NAME_PARTICLES: &[&str] = &[
    "de", "da", "del", "della", "di", "do", "dos", "du", "la", "le", "von", "van", "der", "upon",
    "am", "sur",
];

/// Capitalized tokens that are never the start of a place name
pub const STOPWORDS: &[&str] = &["i", "i'm", "let's", "what", "is", "the", "and"];

/// Inputs shorter than this cannot hold a place name
const MIN_QUERY_CHARS: usize = 5;

/// Candidates must be longer than this
const MIN_LOCATION_CHARS: usize = 2;

/// Classify what the user is asking for.
///
/// Keywords match case-insensitively anywhere in the text. Text matching
/// neither vocabulary is treated as trip planning.
#[must_use]
pub fn classify_intent(text: &str) -> QueryIntent {
    let lowered = text.to_lowercase();
    let mentions = |vocabulary: &[&str]| vocabulary.iter().any(|k| lowered.contains(k));

    QueryIntent::new(mentions(WEATHER_KEYWORDS), mentions(PLACES_KEYWORDS))
}

/// Pull the most likely place name out of free text
#[must_use]
pub fn extract_location(text: &str) -> Option<String> {
    let text = text.trim();
    if text.chars().count() < MIN_QUERY_CHARS {
        return None;
    }

    LOCATION_RULES
        .iter()
        .find_map(|rule| match_rule(text, rule))
        .or_else(|| capitalized_run(text))
}

/// Scan left to right for any of the rule's phrases and capture what follows
fn match_rule(text: &str, rule: &LocationRule) -> Option<String> {
    // ASCII lowercasing keeps byte offsets valid for `text`
    let lowered = text.to_ascii_lowercase();

    for (start, _) in text.char_indices() {
        if !at_word_start(text, start) {
            continue;
        }
        for phrase in rule.phrases {
            if !lowered[start..].starts_with(phrase) {
                continue;
            }
            let rest = &text[start + phrase.len()..];
            let after_gap = rest.trim_start();
            if after_gap.len() == rest.len() {
                // phrase must be followed by whitespace
                continue;
            }
            if let Some(candidate) = capture_place(after_gap) {
                return Some(candidate);
            }
        }
    }
    None
}

fn at_word_start(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric())
}

/// Capture consecutive capitalized words.
///
/// The run ends at a lowercase word, a connector word, punctuation, or the end
/// of the text. A lowercase particle stays in the run when a capitalized word
/// follows it, as in "Rio de Janeiro".
fn capture_place(text: &str) -> Option<String> {
    let mut words = Vec::new();
    let mut cursor = text;

    loop {
        let (word, rest) = split_word(cursor);
        let particle = !words.is_empty() && is_particle(word) && continues_name(rest);

        if !(particle || starts_uppercase(word)) || is_connector(word) {
            break;
        }
        words.push(word);

        let next = rest.trim_start();
        if next.len() == rest.len() {
            break;
        }
        cursor = next;
    }

    let candidate = words.join(" ");
    (candidate.chars().count() > MIN_LOCATION_CHARS).then_some(candidate)
}

/// Split off the leading run of letters
fn split_word(text: &str) -> (&str, &str) {
    let len = text
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(text.len());
    text.split_at(len)
}

/// Whether whitespace and then a capitalized, non-connector word follow
fn continues_name(rest: &str) -> bool {
    let next = rest.trim_start();
    if next.len() == rest.len() {
        return false;
    }
    let (word, _) = split_word(next);
    starts_uppercase(word) && !is_connector(word)
}

fn is_particle(word: &str) -> bool {
    NAME_PARTICLES.contains(&word)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_connector(word: &str) -> bool {
    CONNECTOR_WORDS
        .iter()
        .any(|connector| word.eq_ignore_ascii_case(connector))
}

fn is_stopword(token: &str) -> bool {
    let lowered = token.to_lowercase();
    STOPWORDS.contains(&lowered.as_str())
}

/// Fallback: the first run of capitalized tokens that is not a stopword
fn capitalized_run(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        if !starts_uppercase(token) || is_stopword(token) {
            continue;
        }

        let run: Vec<&str> = tokens[i..]
            .iter()
            .copied()
            .take_while(|t| starts_uppercase(t))
            .collect();
        let joined = run.join(" ");
        let location = joined.trim_matches(|c: char| c.is_ascii_punctuation());

        if location.chars().count() > MIN_LOCATION_CHARS {
            return Some(location.to_string());
        }
    }
    None
}
