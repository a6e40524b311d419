//! Strict local answer checking.
//!
//! This is the offline fallback path: lowercase + trim, then exact equality.
//! No accent folding and no fuzzy matching, so "nao" is wrong where "não" is
//! expected. Claude grading (when enabled) can be more lenient; this cannot.

/// Lowercase and trim a submitted or expected answer.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// True iff the normalized forms are exactly equal. Total over all strings.
pub fn is_match(user_answer: &str, correct_answer: &str) -> bool {
  normalize_answer(user_answer) == normalize_answer(correct_answer)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn case_and_surrounding_whitespace_are_ignored() {
    assert!(is_match("Falo", "falo "));
    assert!(is_match("  FALO  ", "falo"));
    assert!(is_match("", ""));
    assert!(is_match("   ", ""));
  }

  #[test]
  fn different_words_do_not_match() {
    assert!(!is_match("fala", "falo"));
    assert!(!is_match("falo", ""));
  }

  #[test]
  fn diacritics_are_significant() {
    assert!(!is_match("nao", "não"));
    assert!(!is_match("esta", "está"));
    assert!(is_match("Não", "não"));
  }

  #[test]
  fn interior_whitespace_is_significant() {
    assert!(!is_match("tudo  bem", "tudo bem"));
    assert!(is_match(" tudo bem ", "tudo bem"));
  }
}
