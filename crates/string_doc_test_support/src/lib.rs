pub mod fixtures;

/// Escape control characters and quotes so a line stays on one line in test output.
pub fn escape_text(text: &str) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Human-readable report of where two line lists first diverge.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;
    const MISSING: &str = "<missing>";
    fn line(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or(MISSING)
    }

    let max = expected.len().max(actual.len());
    let mut out = String::new();
    let mismatch = (0..max).find(|&i| line(expected, i) != line(actual, i));
    match mismatch {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(
                &mut out,
                "first mismatch at line {} (showing {}..={}):",
                i + 1,
                start + 1,
                end
            );
            for idx in start..end {
                let marker = if idx == i { ">" } else { " " };
                let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", idx + 1, line(expected, idx));
                let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", idx + 1, line(actual, idx));
            }
        }
        None => {
            let _ = writeln!(&mut out, "no line differs");
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Split rendered markup into lines for [`diff_lines`].
pub fn html_lines(html: &str) -> Vec<String> {
    html.split('\n').map(escape_text).collect()
}
