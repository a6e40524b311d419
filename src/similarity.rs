//! Levenshtein edit distance over Unicode scalar values.
//!
//! Inputs are single words or short phrases (gap-fill answers), so the
//! quadratic DP table is fine. Counting `char`s keeps accented Portuguese
//! letters ("é", "ã", "ç") at weight 1 instead of their UTF-8 byte width.

/// Minimum number of single-character insertions, deletions, or
/// substitutions needed to turn `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
  let a_chars: Vec<char> = a.chars().collect();
  let b_chars: Vec<char> = b.chars().collect();
  let (n, m) = (a_chars.len(), b_chars.len());

  if n == 0 { return m; }
  if m == 0 { return n; }

  let mut table = vec![vec![0usize; m + 1]; n + 1];
  for i in 0..=n { table[i][0] = i; }
  for j in 0..=m { table[0][j] = j; }

  for i in 1..=n {
    for j in 1..=m {
      if a_chars[i - 1] == b_chars[j - 1] {
        table[i][j] = table[i - 1][j - 1];
      } else {
        table[i][j] = 1 + table[i - 1][j - 1]
          .min(table[i][j - 1])
          .min(table[i - 1][j]);
      }
    }
  }

  table[n][m]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_is_zero() {
    for s in ["", "falo", "coração", "tudo bem"] {
      assert_eq!(edit_distance(s, s), 0);
    }
  }

  #[test]
  fn empty_against_anything_is_length() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "fala"), 4);
    assert_eq!(edit_distance("fala", ""), 4);
    // char count, not byte count
    assert_eq!(edit_distance("", "ação"), 4);
  }

  #[test]
  fn symmetric() {
    let pairs = [("falo", "fala"), ("falar", "comer"), ("", "não"), ("está", "estão")];
    for (a, b) in pairs {
      assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} vs {b}");
    }
  }

  #[test]
  fn known_distances() {
    assert_eq!(edit_distance("falo", "fala"), 1);
    assert_eq!(edit_distance("falo", "talo"), 1);
    assert_eq!(edit_distance("falo", "falamos"), 3);
    assert_eq!(edit_distance("gato", "rato"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
  }

  #[test]
  fn accents_count_as_single_edits() {
    assert_eq!(edit_distance("esta", "está"), 1);
    assert_eq!(edit_distance("falarão", "falaram"), 1);
  }

  #[test]
  fn triangle_inequality_holds() {
    let words = ["falo", "fala", "falamos", "comer", "", "é"];
    for a in words {
      for b in words {
        for c in words {
          assert!(
            edit_distance(a, b) <= edit_distance(a, c) + edit_distance(c, b),
            "triangle violated for {a:?} {b:?} {c:?}"
          );
        }
      }
    }
  }
}
