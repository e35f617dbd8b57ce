/// Cleans up formatting artifacts in model replies before they are stored
/// or returned. Rules run in a fixed order; later ones see the output of
/// earlier ones.
pub fn sanitize(raw: &str) -> String {
    let text = raw.strip_prefix('"').unwrap_or(raw);
    let text = text.strip_suffix('"').unwrap_or(text);

    let text = text
        .replace("\\n", "\n")
        .replace("|n", "\n")
        .replace("\\\\n", "\n");

    let text = text
        .replace("\\n- ", "\n• ")
        .replace("\n- ", "\n• ")
        .replace("In- ", "\n• ");

    let text = text.replace("nlf", "");
    // Known defect: also hits "In" inside words ("Internship" -> "\nternship").
    let text = text.replace("In", "\n");
    let text = text.replace("\"\"", "\"");

    let mut text = text
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");

    while text.contains("\n\n\n") {
        text = text.replace("\n\n\n", "\n\n");
    }

    text.replace("\\t", "    ")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_example() {
        let raw = r"Hello|nIn- World\n\n\nEnd";
        assert_eq!(sanitize(raw), "Hello\n\n• World\n\nEnd");
    }

    #[test]
    fn test_strips_one_pair_of_wrapping_quotes() {
        assert_eq!(sanitize("\"Sure, happy to help!\""), "Sure, happy to help!");
        assert_eq!(sanitize("\"\"nested\"\""), "\"nested\"");
        assert_eq!(sanitize("\""), "");
    }

    #[test]
    fn test_dash_lists_become_bullets() {
        assert_eq!(
            sanitize("Options:\n- Nurse\n- Teacher"),
            "Options:\n• Nurse\n• Teacher"
        );
        assert_eq!(sanitize(r"Options:\n- Nurse"), "Options:\n• Nurse");
    }

    #[test]
    fn test_drops_nlf_marker() {
        assert_eq!(sanitize("Hellonlf there"), "Hello there");
    }

    #[test]
    fn test_in_is_replaced_even_inside_words() {
        assert_eq!(sanitize("Internships help"), "ternships help");
        assert_eq!(sanitize("Try In person"), "Try\nperson");
    }

    #[test]
    fn test_collapses_whitespace_and_blank_lines() {
        assert_eq!(sanitize("  a   b\t c\n\n\n\nd  "), "a b c\n\nd");
        assert_eq!(sanitize("one\n \n \n \ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_unescapes_tabs_and_quotes() {
        assert_eq!(sanitize(r#"Say \"hi\"\tok it\'s"#), "Say \"hi\"    ok it's");
    }

    #[test]
    fn test_collapses_doubled_quotes() {
        assert_eq!(sanitize(r#"a ""quoted"" word"#), "a \"quoted\" word");
    }

    #[test]
    fn test_is_deterministic_and_idempotent() {
        for raw in [
            r"Hello|nIn- World\n\n\nEnd",
            "Options:\n- Nurse\n- Teacher",
            "  a   b\t c\n\n\n\nd  ",
            "Plain answer.",
        ] {
            let once = sanitize(raw);
            assert_eq!(once, sanitize(raw));
            assert_eq!(sanitize(&once), once);
        }
    }
}
