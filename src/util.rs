//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Uppercase the first character, leave the rest untouched.
/// Used to catch "Falar" when "falar" is already among the options.
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", cut, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_all_occurrences() {
    let out = fill_template("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and y and x");
  }

  #[test]
  fn capitalize_first_handles_accents_and_empty() {
    assert_eq!(capitalize_first("falar"), "Falar");
    assert_eq!(capitalize_first("água"), "Água");
    assert_eq!(capitalize_first(""), "");
  }
}
