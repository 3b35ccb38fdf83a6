//! Purely textual whitespace normalization, applied after codegen is final.
//!
//! Strictly style-level: trailing whitespace is trimmed, runs of blank lines
//! collapse to one, leading/trailing blank lines disappear. It never touches
//! tokens, so it cannot change what the generated Lua means.

/// Normalize `code`, returning the result and the number of edits made.
pub fn normalize(code: &str) -> (String, usize) {
    let mut edits = 0;
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;

    for line in code.lines() {
        let trimmed = line.trim_end();
        if trimmed.len() != line.len() {
            edits += 1;
        }
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                edits += 1;
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(trimmed);
    }

    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
        edits += 1;
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
        edits += 1;
    }

    (lines.join("\n"), edits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_normal_input_is_untouched() {
        let code = "local x = 5\nx = x + 1";
        let (out, edits) = normalize(code);
        assert_eq!(out, code);
        assert_eq!(edits, 0);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let (out, edits) = normalize("local x = 5  \nreturn x\t");
        assert_eq!(out, "local x = 5\nreturn x");
        assert_eq!(edits, 2);
    }

    #[test]
    fn test_blank_runs_collapse() {
        let (out, edits) = normalize("a\n\n\n\nb");
        assert_eq!(out, "a\n\nb");
        assert_eq!(edits, 2);
    }

    #[test]
    fn test_outer_blank_lines_removed() {
        let (out, _) = normalize("\nlocal x = 1\n\n");
        assert_eq!(out, "local x = 1");
    }

    #[test]
    fn test_tokens_are_never_touched() {
        let code = "local s = \"a  b\"  ";
        let (out, _) = normalize(code);
        assert_eq!(out, "local s = \"a  b\"");
    }
}
