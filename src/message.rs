/// Longest subject line git tooling renders without wrapping.
pub const MAX_LENGTH: usize = 72;

const QUOTE_CHARS: [char; 3] = ['"', '\'', '`'];

/// Collapse a raw model response into a commit subject line: first line
/// only, wrapping quotes removed, truncated to 72 characters with a `...`
/// marker. Total — every input produces a valid message, and the output is
/// a fixed point of this function.
pub fn normalize(raw: &str) -> String {
    let first_line = raw.trim().lines().next().unwrap_or("");
    let unquoted = first_line
        .trim()
        .trim_matches(|c| QUOTE_CHARS.contains(&c))
        .trim();

    if unquoted.chars().count() > MAX_LENGTH {
        let kept: String = unquoted.chars().take(MAX_LENGTH - 3).collect();
        format!("{kept}...")
    } else {
        unquoted.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_clean_single_line() {
        assert_eq!(normalize("feat: add login flow"), "feat: add login flow");
        assert_eq!(normalize("  fix: trim me  "), "fix: trim me");
    }

    #[test]
    fn strips_wrapping_quotes_and_extra_lines() {
        let raw = "\"feat: add login flow\"\nExtra explanation here";
        assert_eq!(normalize(raw), "feat: add login flow");
        assert_eq!(normalize("'chore: quoted'"), "chore: quoted");
        assert_eq!(normalize("`style: ticked`"), "style: ticked");
    }

    #[test]
    fn truncates_to_exactly_72_with_ellipsis() {
        let raw = format!("feat: {}", "x".repeat(100));
        let message = normalize(&raw);
        assert_eq!(message.chars().count(), 72);
        assert!(message.ends_with("..."));
        assert!(message.starts_with("feat: "));
    }

    #[test]
    fn exactly_72_chars_is_left_alone() {
        let raw = format!("fix: {}", "y".repeat(67));
        assert_eq!(raw.len(), 72);
        assert_eq!(normalize(&raw), raw);
    }

    #[test]
    fn is_idempotent() {
        let long = format!("test: {}", "z".repeat(90));
        let inputs = [
            "\"'docs: double wrapped'\"",
            "feat: plain",
            "refactor: multi\nline\nresponse",
            long.as_str(),
            "\" spaced inside quotes \"",
            "",
            "\"",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not a fixed point for {input:?}");
        }
    }

    #[test]
    fn never_exceeds_72_chars() {
        let inputs = [
            String::new(),
            "short".to_string(),
            "é".repeat(200),
            format!("feat: {}\nbody", "w".repeat(300)),
        ];
        for input in &inputs {
            assert!(normalize(input).chars().count() <= 72);
        }
    }
}
