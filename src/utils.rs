use super::*;

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %H:%M";

/// Renders a backend timestamp as e.g. `Jan 1, 2024, 09:30`.
///
/// Offsets are converted to local time, zone-less timestamps are shown as
/// written, and anything unparsable is returned untouched.
pub(crate) fn format_timestamp(raw: &str) -> String {
  if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
    return timestamp
      .with_timezone(&Local)
      .format(TIMESTAMP_FORMAT)
      .to_string();
  }

  if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
  {
    return timestamp.format(TIMESTAMP_FORMAT).to_string();
  }

  raw.to_string()
}

/// Last `max_chars` characters of `text`, for single-line inputs that
/// scroll with the cursor.
pub(crate) fn tail(text: &str, max_chars: usize) -> &str {
  let count = text.chars().count();

  if count <= max_chars {
    return text;
  }

  text
    .char_indices()
    .nth(count - max_chars)
    .map_or("", |(index, _)| &text[index..])
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = text.chars().take(max_chars).collect::<String>();

  result.truncate(result.trim_end().len());
  result.push_str("...");

  result
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(std::mem::take(&mut current));
      current.push_str(word);
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
