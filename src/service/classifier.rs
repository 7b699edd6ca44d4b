// service/classifier.rs
//
// Keyword triage for incoming requests. Matching is whole-word and
// case-insensitive, so "cracked" does not trip the "ac" keyword.

use crate::models::ticketmodel::{TicketCategory, TicketPriority};

const MAINTENANCE_KEYWORDS: &[&str] = &["ac", "leak", "pipe", "water", "fan", "bulb", "light"];
const HOUSEKEEPING_KEYWORDS: &[&str] = &["clean", "trash", "dirty", "sweep"];

const HIGH_KEYWORDS: &[&str] = &["urgent", "asap", "critical", "emergency", "broken", "help"];
const MEDIUM_KEYWORDS: &[&str] = &["not working", "stopped", "down"];

/// Map free text to a (category, priority) pair.
///
/// Keyword sets are checked in a fixed precedence order; text that matches
/// nothing falls back to (IT, Low). Deterministic and side-effect free.
pub fn auto_classify(text: &str) -> (TicketCategory, TicketPriority) {
    let content = normalize(text);

    let category = if matches_any(&content, MAINTENANCE_KEYWORDS) {
        TicketCategory::Maintenance
    } else if matches_any(&content, HOUSEKEEPING_KEYWORDS) {
        TicketCategory::Housekeeping
    } else {
        TicketCategory::It
    };

    let priority = if matches_any(&content, HIGH_KEYWORDS) {
        TicketPriority::High
    } else if matches_any(&content, MEDIUM_KEYWORDS) {
        TicketPriority::Medium
    } else {
        TicketPriority::Low
    };

    (category, priority)
}

/// Lowercase the text, squash every non-alphanumeric run to a single
/// space and pad the ends, so keywords can be matched on word boundaries
/// with a plain substring test.
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    format!(" {} ", words.join(" "))
}

fn matches_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|keyword| normalized.contains(&format!(" {} ", keyword)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_text_gets_defaults() {
        let (category, priority) = auto_classify("my keyboard layout looks odd");
        assert_eq!(category, TicketCategory::It);
        assert_eq!(priority, TicketPriority::Low);
    }

    #[test]
    fn maintenance_beats_housekeeping() {
        // Both sets match; maintenance is checked first.
        let (category, _) = auto_classify("there is a leak and the floor needs a clean");
        assert_eq!(category, TicketCategory::Maintenance);
    }

    #[test]
    fn high_beats_medium() {
        let (_, priority) = auto_classify("the printer is broken and not working");
        assert_eq!(priority, TicketPriority::High);
    }

    #[test]
    fn broken_chair_is_it_high() {
        // "cracked" must not match the "ac" keyword.
        let (category, priority) = auto_classify("Broken chair leg is cracked");
        assert_eq!(category, TicketCategory::It);
        assert_eq!(priority, TicketPriority::High);
    }

    #[test]
    fn multi_word_keyword_matches_as_phrase() {
        let (_, priority) = auto_classify("the projector is not working");
        assert_eq!(priority, TicketPriority::Medium);
    }

    #[test]
    fn matching_is_case_insensitive_and_deterministic() {
        let first = auto_classify("URGENT: AC unit failure in room 4");
        let second = auto_classify("URGENT: AC unit failure in room 4");
        assert_eq!(first, second);
        assert_eq!(first, (TicketCategory::Maintenance, TicketPriority::High));
    }

    #[test]
    fn punctuation_does_not_hide_keywords() {
        let (category, priority) = auto_classify("water-cooler: leak!");
        assert_eq!(category, TicketCategory::Maintenance);
        assert_eq!(priority, TicketPriority::Low);
    }
}
