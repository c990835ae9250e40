use std::collections::HashMap;
use std::path::PathBuf;
use unicode_general_category::{get_general_category, GeneralCategory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub word_count: usize,
    /// Sorted by descending count, then by character.
    pub character_frequencies: Vec<(char, usize)>,
}

#[derive(Debug)]
pub struct BookAnalysis {
    pub path: PathBuf,
    pub report: Report,
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn count_characters(text: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in text.chars().filter(|c| is_letter(*c)) {
        *counts.entry(fold_case(c)).or_insert(0) += 1;
    }
    counts
}

/// Letters are the Unicode `L*` general categories. Letter numbers (Ⅻ),
/// circled letters (Ⓐ) and combining marks (ा) are not letters.
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Some letters lowercase to more than one char ('İ' becomes "i\u{307}");
/// only the first letter is kept so every letter yields one key.
fn fold_case(c: char) -> char {
    c.to_lowercase().find(|l| is_letter(*l)).unwrap_or(c)
}

pub fn sort_characters(counts: &HashMap<char, usize>) -> Vec<(char, usize)> {
    let mut sorted: Vec<(char, usize)> = counts.iter().map(|(c, n)| (*c, *n)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}

pub fn analyze(text: &str) -> Report {
    Report {
        word_count: count_words(text),
        character_frequencies: sort_characters(&count_characters(text)),
    }
}
