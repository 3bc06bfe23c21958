//! First-letter facet.
//!
//! The alphabet bar on the listing page is derived from the titles that
//! actually exist: one entry per distinct leading character, letters first.

use regex::Regex;
use std::collections::BTreeSet;
use glossa_db::Term;

fn leading_char_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Optional opening parenthesis, then a Cyrillic/Latin letter or a digit.
        Regex::new(r"^\(?([А-ЯЁA-Zа-яёa-z0-9])").expect("leading letter pattern is valid")
    })
}

/// Facet key for a title: its first alphanumeric character, uppercased,
/// looking past one leading `(`. `None` when the title starts with anything
/// else.
pub fn facet_letter(title: &str) -> Option<String> {
    leading_char_regex()
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// Distinct facet letters over `terms`. Alphabetic entries sort before the
/// rest; within each group the order is by code point.
pub fn letter_facet<'a, I>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Term>,
{
    let distinct: BTreeSet<String> = terms
        .into_iter()
        .filter_map(|term| facet_letter(&term.title))
        .collect();

    let mut letters: Vec<String> = distinct.into_iter().collect();
    letters.sort_by_key(|letter| (!letter.chars().all(char::is_alphabetic), letter.clone()));
    letters
}

/// Whether `title` starts with `letter`, ignoring case and one leading `(`.
pub fn starts_with_letter(title: &str, letter: &str) -> bool {
    let mut wanted = letter.chars();
    let (Some(wanted), None) = (wanted.next(), wanted.next()) else {
        return false;
    };

    let stripped = title.strip_prefix('(').unwrap_or(title);
    match stripped.chars().next() {
        Some(first) => first.to_lowercase().eq(wanted.to_lowercase()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(title: &str) -> Term {
        Term {
            id: 0,
            category_id: 1,
            title: title.to_string(),
            description: String::new(),
            image: None,
        }
    }

    #[test]
    fn test_facet_letter_rules() {
        assert_eq!(facet_letter("(Python)").as_deref(), Some("P"));
        assert_eq!(facet_letter("123Test").as_deref(), Some("1"));
        assert_eq!(facet_letter("!!!"), None);
        assert_eq!(facet_letter("алгоритм").as_deref(), Some("А"));
        assert_eq!(facet_letter("ёлка").as_deref(), Some("Ё"));
        assert_eq!(facet_letter("((double)"), None);
        assert_eq!(facet_letter(""), None);
    }

    #[test]
    fn test_letter_facet_letters_before_digits() {
        let terms = vec![
            term("123Test"),
            term("(Python)"),
            term("!!!"),
            term("java"),
            term("Jython"),
            term("База данных"),
            term("7zip"),
        ];
        assert_eq!(letter_facet(&terms), vec!["J", "P", "Б", "1", "7"]);
    }

    #[test]
    fn test_letter_facet_empty() {
        assert!(letter_facet(&Vec::<Term>::new()).is_empty());
    }

    #[test]
    fn test_starts_with_letter() {
        assert!(starts_with_letter("(Python)", "p"));
        assert!(starts_with_letter("python", "P"));
        assert!(starts_with_letter("Сервер", "с"));
        assert!(starts_with_letter("1C", "1"));
        assert!(!starts_with_letter("Java", "p"));
        assert!(!starts_with_letter("Python", "py"));
        assert!(!starts_with_letter("", "p"));
        assert!(!starts_with_letter("(", "p"));
    }
}
