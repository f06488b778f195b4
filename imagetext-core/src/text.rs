use regex::Regex;
use std::sync::OnceLock;

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("valid spaces regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Three or more consecutive newlines collapse to one blank line.
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank lines regex"))
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").expect("valid word regex"))
}

/// Cleans up provider output before it is shown or stored.
///
/// Unlike transcription cleanup this must preserve line structure: the canned
/// texts are letters and labels where the newlines carry meaning.
pub fn normalize_extracted_text(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");

    out = spaces_re().replace_all(&out, " ").to_string();
    out = blank_lines_re().replace_all(&out, "\n\n").to_string();

    // Trim trailing whitespace per line, then the whole block.
    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Turns a free-form prompt into the keyword query the stock photo service
/// expects, e.g. "An astronaut riding a horse" -> "an,astronaut,riding,a,horse".
pub fn prompt_query(prompt: &str) -> String {
    word_re()
        .find_iter(prompt)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn preview_text(text: &str) -> String {
    const MAX: usize = 120;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX {
        return trimmed.to_string();
    }

    trimmed.chars().take(MAX).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_preserves_paragraph_breaks() {
        let input = "Dear Sarah,\n\n\n\nThank  you.\t\n\nEmily  ";
        assert_eq!(
            normalize_extracted_text(input),
            "Dear Sarah,\n\nThank you.\n\nEmily"
        );
    }

    #[test]
    fn normalization_handles_crlf() {
        assert_eq!(normalize_extracted_text("a\r\nb"), "a\nb");
    }

    #[test]
    fn prompt_query_keeps_only_words() {
        assert_eq!(
            prompt_query("An astronaut riding a horse on Mars, digital art"),
            "an,astronaut,riding,a,horse,on,mars,digital,art"
        );
        assert_eq!(prompt_query("  !!  "), "");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(200);
        let p = preview_text(&long);
        assert_eq!(p.chars().count(), 121);
        assert!(p.ends_with('…'));

        assert_eq!(preview_text("  short  "), "short");
    }
}
