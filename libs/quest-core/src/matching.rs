//! Command matching for practice steps.
//!
//! A submission is classified against the accepted answers by a fixed chain of
//! strategies; the first one that applies decides the outcome:
//!
//! 1. blank input never matches
//! 2. exact match after normalization
//! 3. a known command from another ecosystem (`dir`, `md`, ...)
//! 4. a typo within edit distance 2 of a candidate's command name
//! 5. the right command name with different arguments
//! 6. a topic hint for the first candidate, or a generic hint

use crate::error::{Result, ValidationError};
use crate::hints;
use crate::types::ValidationOutcome;

/// Largest edit distance still reported as a typo.
pub const MAX_TYPO_DISTANCE: usize = 2;

/// Check a submission against the accepted answers.
///
/// Total: invalid arguments come back as a non-matching outcome whose hint
/// explains the problem.
pub fn validate_input<S: AsRef<str>>(input: &str, expected: &[S]) -> ValidationOutcome {
    classify(input, expected).unwrap_or_else(|e| ValidationOutcome::mismatch(e.hint()))
}

/// Like [`validate_input`], but reports invalid arguments as an error so the
/// caller can log them before showing the hint.
pub fn classify<S: AsRef<str>>(input: &str, expected: &[S]) -> Result<ValidationOutcome> {
    if expected.is_empty() {
        return Err(ValidationError::MissingExpectedCommands);
    }

    let normalized = normalize_input(input);
    if normalized.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if is_exact_match(&normalized, expected) {
        return Ok(ValidationOutcome::matched());
    }

    Ok(ValidationOutcome::mismatch(generate_hint(&normalized, expected)))
}

impl ValidationError {
    /// Learner-facing hint for this error.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::EmptyInput => hints::EMPTY_INPUT_HINT,
            Self::MissingExpectedCommands => hints::CONFIGURATION_ERROR_HINT,
        }
    }
}

/// Trim, lowercase and collapse whitespace runs to single spaces.
pub fn normalize_input(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Text before the first space.
fn first_token(s: &str) -> &str {
    s.split(' ').next().unwrap_or("")
}

/// Candidates are lowercased but otherwise compared verbatim.
fn is_exact_match<S: AsRef<str>>(normalized: &str, expected: &[S]) -> bool {
    expected
        .iter()
        .any(|cmd| normalized == cmd.as_ref().to_lowercase())
}

fn generate_hint<S: AsRef<str>>(normalized: &str, expected: &[S]) -> String {
    let command = first_token(normalized);

    if let Some(correction) = hints::common_mistake(command) {
        return hints::wrong_ecosystem_hint(correction);
    }

    if let Some(similar) = find_similar_command(command, expected) {
        return hints::typo_hint(similar);
    }

    if let Some(partial) = find_same_command(command, expected) {
        return hints::right_command_hint(partial);
    }

    fallback_hint(expected).to_string()
}

/// Candidate whose command name is closest to `command`, if within
/// [`MAX_TYPO_DISTANCE`]. Ties go to the earliest candidate.
pub fn find_similar_command<'a, S: AsRef<str>>(command: &str, expected: &'a [S]) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;

    for cmd in expected {
        let cmd = cmd.as_ref();
        let lowered = cmd.to_lowercase();
        let distance = levenshtein_distance(command, first_token(&lowered));

        if distance > MAX_TYPO_DISTANCE {
            continue;
        }
        // Strictly less: an equal distance never displaces an earlier candidate.
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((cmd, distance));
        }
    }

    best.map(|(cmd, _)| cmd)
}

/// First candidate with exactly the same command name.
fn find_same_command<'a, S: AsRef<str>>(command: &str, expected: &'a [S]) -> Option<&'a str> {
    expected
        .iter()
        .map(|cmd| cmd.as_ref())
        .find(|cmd| first_token(&cmd.to_lowercase()) == command)
}

/// Topic hint for the whole first candidate, then its command name.
fn fallback_hint<S: AsRef<str>>(expected: &[S]) -> &'static str {
    expected
        .first()
        .map(|cmd| cmd.as_ref())
        .and_then(|first| hints::command_hint(first).or_else(|| hints::command_hint(first_token(first))))
        .unwrap_or(hints::GENERIC_HINT)
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("pws", "pwd"), 1);
        assert_eq!(levenshtein_distance("pws", "cd"), 3);
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  LS   -LA \t"), "ls -la");
        assert_eq!(normalize_input("   "), "");
    }

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        assert_eq!(validate_input("pwd", &["pwd"]), ValidationOutcome::matched());
        assert_eq!(validate_input("  PWD ", &["pwd"]), ValidationOutcome::matched());
        assert_eq!(validate_input("ls    -la", &["ls -la"]), ValidationOutcome::matched());
        assert_eq!(validate_input("ls -la", &["pwd", "LS -LA"]), ValidationOutcome::matched());
    }

    #[test]
    fn test_candidate_whitespace_is_literal() {
        // Candidates are not collapsed, so a double space in the answer never matches.
        let outcome = validate_input("ls -la", &["ls  -la"]);
        assert!(!outcome.matched);
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "\t\n"] {
            let outcome = validate_input(input, &["pwd"]);
            assert!(!outcome.matched);
            assert_eq!(outcome.hint, hints::EMPTY_INPUT_HINT);
        }
    }

    #[test]
    fn test_no_expected_commands() {
        let expected: [&str; 0] = [];
        for input in ["", "pwd"] {
            let outcome = validate_input(input, &expected);
            assert!(!outcome.matched);
            assert_eq!(outcome.hint, hints::CONFIGURATION_ERROR_HINT);
        }
        assert_eq!(classify("pwd", &expected), Err(ValidationError::MissingExpectedCommands));
    }

    #[test]
    fn test_wrong_ecosystem_command() {
        let outcome = validate_input("md test", &["mkdir test"]);
        assert!(!outcome.matched);
        assert_eq!(outcome.hint, hints::wrong_ecosystem_hint("mkdir"));
    }

    #[test]
    fn test_dictionary_precedes_typo() {
        // "dir" is one edit away from "dirs" but the dictionary wins.
        let outcome = validate_input("dir", &["dirs"]);
        assert_eq!(outcome.hint, hints::wrong_ecosystem_hint("ls"));

        let outcome = validate_input("del notes.txt", &["rm notes.txt"]);
        assert_eq!(outcome.hint, hints::wrong_ecosystem_hint("rm"));
    }

    #[test]
    fn test_typo_names_closest_candidate() {
        let outcome = validate_input("pws", &["pwd", "cd"]);
        assert_eq!(outcome.hint, hints::typo_hint("pwd"));

        let outcome = validate_input("mkdri test", &["mkdir test"]);
        assert_eq!(outcome.hint, hints::typo_hint("mkdir test"));
    }

    #[test]
    fn test_typo_tie_goes_to_first_candidate() {
        // "cx" is one edit from both "cd" and "cp".
        assert_eq!(find_similar_command("cx", &["cd ..", "cp a b"]), Some("cd .."));
        assert_eq!(find_similar_command("cx", &["cp a b", "cd .."]), Some("cp a b"));
    }

    #[test]
    fn test_typo_prefers_smaller_distance_later() {
        assert_eq!(find_similar_command("lss", &["cat", "ls"]), Some("ls"));
        assert_eq!(find_similar_command("whoamii", &["pwd"]), None);
    }

    #[test]
    fn test_same_command_lookup() {
        assert_eq!(find_same_command("touch", &["cat memo.txt", "TOUCH memo.txt"]), Some("TOUCH memo.txt"));
        assert_eq!(find_same_command("rm", &["rmdir old"]), None);
    }

    #[test]
    fn test_same_command_is_caught_by_typo_rule_first() {
        // Distance 0 is within the typo bound, so it reaches rule 4 before rule 5.
        let outcome = validate_input("ls -z", &["ls -la"]);
        assert_eq!(outcome.hint, hints::typo_hint("ls -la"));
    }

    #[test]
    fn test_fallback_topic_hints() {
        let outcome = validate_input("echo hi", &["whoami"]);
        assert_eq!(outcome.hint, hints::command_hint("whoami").unwrap());

        let outcome = validate_input("echo hi", &["grep error log.txt"]);
        assert_eq!(outcome.hint, hints::command_hint("grep").unwrap());

        let compound = "mkdir project && touch project/README.md && ls -la project && date";
        let outcome = validate_input("echo hi", &[compound]);
        assert_eq!(outcome.hint, hints::command_hint(compound).unwrap());
    }

    #[test]
    fn test_generic_fallback() {
        let outcome = validate_input("echo hi", &["xargs -n1"]);
        assert_eq!(outcome.hint, hints::GENERIC_HINT);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let expected = vec!["cat memo.txt".to_string()];
        assert!(validate_input("CAT memo.txt", &expected).matched);
    }
}
