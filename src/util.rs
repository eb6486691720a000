//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// True if the char belongs to the common CJK ideograph ranges.
/// Used to sanity-check configured phrase text.
pub fn is_cjk(ch: char) -> bool {
  matches!(ch,
    '\u{4E00}'..='\u{9FFF}'
      | '\u{3400}'..='\u{4DBF}'
      | '\u{F900}'..='\u{FAFF}'
      | '\u{20000}'..='\u{2A6DF}')
}

/// Log-safe truncation for large strings, counted in chars so multi-byte
/// text never splits mid-character.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  let total = s.chars().count();
  if total <= max_chars {
    s.to_string()
  } else {
    let head: String = s.chars().take(max_chars).collect();
    format!("{}… ({} chars total)", head, total)
  }
}
