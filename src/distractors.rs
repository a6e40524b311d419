//! Multiple-choice distractor filtering, synthesis, and option-set assembly.
//!
//! Flow:
//! 1) Caller gathers raw candidates (Claude suggestions, or `basic_distractors`
//!    when the API is unavailable).
//! 2) `filter_distractors` drops empties, the correct answer itself, and
//!    same-length near-duplicates that would make the question ambiguous.
//! 3) `build_option_set` seeds with the correct answer, adds filtered
//!    candidates, and tops up from a fixed suffix-swap table until it has
//!    4 unique options or the table is exhausted.
//!
//! Everything here is deterministic; presentation order is randomized by the
//! caller. None of these functions error on any input.

use crate::similarity::edit_distance;
use crate::util::capitalize_first;

/// Final option-set size shown to the learner.
pub const OPTION_SET_SIZE: usize = 4;

/// At most this many externally supplied distractors survive the filter.
pub const MAX_FILTERED: usize = 3;

/// Cap on the basic (offline) generator's output.
pub const MAX_BASIC: usize = 6;

/// Same-length candidates within this edit distance of the correct answer
/// are rejected as near-duplicates ("fala" vs "falo").
const NEAR_DUPLICATE_THRESHOLD: usize = 1;

/// Ordered suffix-swap rules used by the fallback generator: strip the last
/// `n` characters, append the ending. Covers the common Portuguese verb
/// endings so top-up options stay morphologically plausible.
const FALLBACK_RULES: &[(usize, &str)] = &[
  (1, "o"),
  (1, "a"),
  (1, "e"),
  (1, "es"),
  (1, "am"),
  (1, "em"),
  (1, "ou"),
  (1, "ei"),
  (1, "ão"),
  (1, "ar"),
  (1, "er"),
  (1, "ir"),
  (1, "ava"),
  (1, "ia"),
  (1, "ado"),
  (1, "ido"),
  (1, "amos"),
  (1, "emos"),
];

/// Strip the last `strip` characters (Unicode-aware) and append `suffix`.
/// Words shorter than `strip` degrade to the bare suffix.
fn swap_suffix(word: &str, strip: usize, suffix: &str) -> String {
  let chars: Vec<char> = word.chars().collect();
  let keep = chars.len().saturating_sub(strip);
  let mut out: String = chars[..keep].iter().collect();
  out.push_str(suffix);
  out
}

/// True when `candidate` has the same length as `correct` and sits within
/// the near-duplicate edit-distance threshold (case-insensitive, trimmed).
fn near_duplicate(candidate: &str, correct: &str) -> bool {
  let c = candidate.trim().to_lowercase();
  let a = correct.trim().to_lowercase();
  c.chars().count() == a.chars().count()
    && edit_distance(&c, &a) <= NEAR_DUPLICATE_THRESHOLD
}

/// Filter raw distractor candidates against the correct answer.
///
/// Rejects empty strings, the correct answer itself (case-insensitive,
/// trimmed), and same-length near-duplicates. Accepts at most
/// [`MAX_FILTERED`] candidates, preserving input order.
pub fn filter_distractors(correct: &str, candidates: &[String]) -> Vec<String> {
  let correct_norm = correct.trim().to_lowercase();
  let mut accepted: Vec<String> = Vec::new();

  for cand in candidates {
    if accepted.len() == MAX_FILTERED {
      break;
    }
    let trimmed = cand.trim();
    let norm = trimmed.to_lowercase();
    if norm.is_empty() || norm == correct_norm {
      continue;
    }
    if near_duplicate(&norm, &correct_norm) {
      continue;
    }
    accepted.push(trimmed.to_string());
  }

  accepted
}

/// Synthesize plausible wrong answers offline, with no Claude call.
///
/// Applies naive pluralization and a handful of length-gated suffix swaps,
/// then blends in up to two filler words from `vocab` that are within ±2
/// characters of the answer's length. Output is capped at [`MAX_BASIC`].
pub fn basic_distractors(correct: &str, vocab: &[String]) -> Vec<String> {
  let answer = correct.trim();
  let len = answer.chars().count();
  let mut out: Vec<String> = Vec::new();

  if !answer.ends_with('s') {
    out.push(format!("{answer}s"));
  }
  if len > 3 {
    out.push(swap_suffix(answer, 1, "a"));
    out.push(swap_suffix(answer, 2, "ou"));
    out.push(swap_suffix(answer, 1, "e"));
  }
  if len > 4 {
    out.push(swap_suffix(answer, 2, "ar"));
    out.push(swap_suffix(answer, 3, "ido"));
  }

  let mut fillers = 0usize;
  for word in vocab {
    if fillers == 2 {
      break;
    }
    let wlen = word.chars().count();
    if word != answer && wlen.abs_diff(len) <= 2 {
      out.push(word.clone());
      fillers += 1;
    }
  }

  out.truncate(MAX_BASIC);
  out
}

/// Generate top-up distractors from the full [`FALLBACK_RULES`] table,
/// skipping anything already in `existing` (exact form or with the first
/// letter capitalized) and anything equal to the answer itself.
pub fn fallback_distractors(correct: &str, existing: &[String]) -> Vec<String> {
  let answer = correct.trim();
  let mut out: Vec<String> = Vec::new();

  for (strip, suffix) in FALLBACK_RULES {
    let candidate = swap_suffix(answer, *strip, suffix);
    if candidate == answer || out.contains(&candidate) {
      continue;
    }
    let capitalized = capitalize_first(&candidate);
    if existing.iter().any(|o| *o == candidate || *o == capitalized) {
      continue;
    }
    out.push(candidate);
  }

  out
}

/// Assemble the final option set: the correct answer plus up to three
/// accepted distractors, topped up from the fallback table when the filter
/// left too few.
///
/// Never errors. Returns fewer than [`OPTION_SET_SIZE`] options only when
/// the transformation table genuinely cannot produce more uniques (a pass
/// that adds nothing terminates the loop). All returned options are pairwise
/// distinct and none is a near-duplicate of the correct answer.
pub fn build_option_set(correct: &str, raw_distractors: &[String]) -> Vec<String> {
  let correct = correct.trim().to_string();
  let mut options: Vec<String> = vec![correct.clone()];

  for d in filter_distractors(&correct, raw_distractors) {
    if options.len() == OPTION_SET_SIZE {
      break;
    }
    if !options.contains(&d) {
      options.push(d);
    }
  }

  while options.len() < OPTION_SET_SIZE {
    let mut added = 0usize;
    for candidate in fallback_distractors(&correct, &options) {
      if options.len() == OPTION_SET_SIZE {
        break;
      }
      if options.contains(&candidate) || near_duplicate(&candidate, &correct) {
        continue;
      }
      options.push(candidate);
      added += 1;
    }
    if added == 0 {
      break;
    }
  }

  options
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn filter_rejects_the_answer_itself_case_insensitively() {
    let out = filter_distractors("falo", &strings(&["falo", "FALO", " Falo "]));
    assert!(out.is_empty(), "got {out:?}");
  }

  #[test]
  fn filter_rejects_empty_and_whitespace_candidates() {
    let out = filter_distractors("falo", &strings(&["", "   ", "comemos"]));
    assert_eq!(out, strings(&["comemos"]));
  }

  #[test]
  fn filter_rejects_same_length_near_duplicates() {
    // "fala" and "talo" are length 4 at distance 1 from "falo"; both must go.
    let out = filter_distractors(
      "falo",
      &strings(&["falo", "fala", "talo", "completely-different"]),
    );
    assert_eq!(out, strings(&["completely-different"]));
  }

  #[test]
  fn filter_keeps_different_length_neighbours() {
    // One char shorter/longer is fine: length gate doesn't apply.
    let out = filter_distractors("falo", &strings(&["fal", "falou"]));
    assert_eq!(out, strings(&["fal", "falou"]));
  }

  #[test]
  fn filter_caps_at_three_preserving_order() {
    let out = filter_distractors(
      "falo",
      &strings(&["comemos", "bebemos", "dormimos", "andamos"]),
    );
    assert_eq!(out, strings(&["comemos", "bebemos", "dormimos"]));
  }

  #[test]
  fn basic_generator_is_deterministic_and_capped() {
    let vocab = strings(&["mais", "muito", "bem", "hoje"]);
    let a = basic_distractors("falamos", &vocab);
    let b = basic_distractors("falamos", &vocab);
    assert_eq!(a, b);
    assert!(a.len() <= MAX_BASIC, "got {a:?}");
  }

  #[test]
  fn basic_generator_applies_documented_transformations() {
    let out = basic_distractors("falamos", &[]);
    // ends in 's': no pluralization; len > 4 unlocks every suffix swap.
    assert!(out.contains(&"falamoa".to_string()), "got {out:?}");
    assert!(out.contains(&"falamou".to_string()), "got {out:?}");
    assert!(out.contains(&"falamoe".to_string()), "got {out:?}");
    assert!(out.contains(&"falamar".to_string()), "got {out:?}");
    assert!(out.contains(&"falaido".to_string()), "got {out:?}");
  }

  #[test]
  fn basic_generator_pluralizes_and_blends_vocab() {
    let vocab = strings(&["sozinho", "não", "bem", "já"]);
    let out = basic_distractors("falo", &vocab);
    assert!(out.contains(&"falos".to_string()), "got {out:?}");
    // only words within ±2 chars of "falo" (4) qualify: "sozinho" (7) is
    // out; "não" and "bem" get in; "já" hits the two-filler cap.
    assert!(out.contains(&"não".to_string()), "got {out:?}");
    assert!(out.contains(&"bem".to_string()), "got {out:?}");
    assert!(!out.contains(&"sozinho".to_string()), "got {out:?}");
    assert!(!out.contains(&"já".to_string()), "filler cap ignored: {out:?}");
  }

  #[test]
  fn basic_generator_skips_suffix_swaps_for_short_answers() {
    let out = basic_distractors("é", &[]);
    assert_eq!(out, strings(&["és"]));
  }

  #[test]
  fn fallback_generator_skips_existing_and_capitalized_forms() {
    let existing = strings(&["falo", "Fala", "falam"]);
    let out = fallback_distractors("falo", &existing);
    assert!(!out.contains(&"falo".to_string()));
    assert!(!out.contains(&"fala".to_string()), "capitalized form in existing: {out:?}");
    assert!(!out.contains(&"falam".to_string()));
    assert!(out.contains(&"falar".to_string()), "got {out:?}");
  }

  #[test]
  fn option_set_contains_answer_and_is_distinct() {
    let cases: &[(&str, &[&str])] = &[
      ("falo", &["fala", "falamos", "falam"]),
      ("comemos", &[]),
      ("está", &["esta", "estás", "estão"]),
      ("ser", &["ir", "ter", "ver", "dar"]),
    ];
    for (answer, raw) in cases {
      let out = build_option_set(answer, &strings(raw));
      assert!(out.len() <= OPTION_SET_SIZE, "{answer}: {out:?}");
      assert!(out.contains(&answer.to_string()), "{answer}: {out:?}");
      for (i, a) in out.iter().enumerate() {
        for b in &out[i + 1..] {
          assert_ne!(a, b, "{answer}: duplicate in {out:?}");
        }
      }
    }
  }

  #[test]
  fn option_set_tops_up_after_filtering_near_duplicates() {
    // "fala" is filtered (same length, distance 1), leaving two accepted
    // candidates; one fallback transformation must complete the set.
    let out = build_option_set("falo", &strings(&["fala", "falamos", "falam"]));
    assert_eq!(out.len(), OPTION_SET_SIZE, "got {out:?}");
    assert!(out.contains(&"falo".to_string()));
    assert!(out.contains(&"falamos".to_string()));
    assert!(out.contains(&"falam".to_string()));
    assert!(!out.contains(&"fala".to_string()), "near-duplicate leaked: {out:?}");
  }

  #[test]
  fn option_set_reaches_four_with_no_candidates_at_all() {
    let out = build_option_set("falamos", &[]);
    assert_eq!(out.len(), OPTION_SET_SIZE, "got {out:?}");
    assert!(out.contains(&"falamos".to_string()));
  }

  #[test]
  fn option_set_terminates_on_degenerate_single_char_answer() {
    let out = build_option_set("a", &[]);
    assert!(!out.is_empty());
    assert!(out.contains(&"a".to_string()));
    assert!(out.len() <= OPTION_SET_SIZE);
    // no same-length near-duplicates of the answer may appear
    for opt in &out {
      if opt != "a" {
        assert_ne!(opt.chars().count(), 1, "near-duplicate leaked: {out:?}");
      }
    }
  }
}
