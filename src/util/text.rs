// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;

/// Convert trusted question markup into terminal text.
///
/// This function:
/// 1. Decodes HTML entities (e.g., &amp; → &)
/// 2. Turns block-level tags into line breaks
/// 3. Removes all remaining tags
/// 4. Collapses the result into trimmed, non-empty lines
///
/// # Examples
///
/// ```
/// use exoseeker::util::text::plain_text;
///
/// let html = "<p>What does <strong>TESS</strong> stand for?</p>";
/// assert_eq!(plain_text(html), "What does TESS stand for?");
/// ```
pub fn plain_text(html: &str) -> String {
    let decoded = decode_html_entities(html).to_string();

    let block_re = Regex::new(r"</?(p|div|br|li|h[1-6])[^>]*>").unwrap();
    let with_newlines = block_re.replace_all(&decoded, "\n").into_owned();

    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let no_tags = tag_re.replace_all(&with_newlines, "").into_owned();

    no_tags
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a number the way an en-US locale does: `,` thousands separators
/// and at most three fraction digits, trailing zeros dropped.
///
/// ```
/// use exoseeker::util::text::format_number;
///
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(0.98765), "0.988");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_simple_html_when_converting_then_returns_text_without_tags() {
        let html = "<p>What is a transit?</p>";
        assert_eq!(plain_text(html), "What is a transit?");
    }

    #[test]
    fn given_multiline_html_when_converting_then_keeps_one_line_per_block() {
        let html = "<p>First line</p><p>Second line</p>";
        assert_eq!(plain_text(html), "First line\nSecond line");
    }

    #[test]
    fn given_html_entities_when_converting_then_decodes_entities() {
        let html = "<p>Kepler &amp; K2</p>";
        assert_eq!(plain_text(html), "Kepler & K2");
    }

    #[test]
    fn given_nested_tags_when_converting_then_removes_all_tags() {
        let html = "<div><strong>Bold</strong> and <em>italic</em></div>";
        assert_eq!(plain_text(html), "Bold and italic");
    }

    #[test]
    fn given_only_tags_when_converting_then_returns_empty_string() {
        assert_eq!(plain_text("<div></div><p></p>"), "");
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(-0.0001, "0")]
    #[case(12.0, "12")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(5778.25, "5,778.25")]
    #[case(-1234.5, "-1,234.5")]
    #[case(0.1, "0.1")]
    #[case(3.14159, "3.142")]
    #[case(123456789.0, "123,456,789")]
    fn given_number_when_formatting_then_matches_en_us_locale(
        #[case] value: f64,
        #[case] expected: &str,
    ) {
        assert_eq!(format_number(value), expected);
    }
}
