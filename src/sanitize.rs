//! Clean up model output before it reaches the editor.
//!
//! Models are told not to, but they wrap code in Markdown fences anyway. We
//! drop every fence delimiter wherever it occurs, along with its language
//! tag and the newline after it, and then trim.

use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII word characters only, like a JS `\w`.
    Regex::new(r"```[A-Za-z0-9_]*\n?").expect("fence pattern is valid")
});

/// Strip Markdown code fences from `text` and trim surrounding whitespace.
pub fn strip_fences(text: &str) -> String {
    FENCE.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_html() {
        assert_eq!(strip_fences("```html\n<div>x</div>\n```"), "<div>x</div>");
    }

    #[test]
    fn test_untagged_fence() {
        assert_eq!(strip_fences("```\nconst a = 1;\n```\n"), "const a = 1;");
    }

    #[test]
    fn test_no_fence() {
        assert_eq!(strip_fences("  <p>hi</p>\n\n"), "<p>hi</p>");
    }

    #[test]
    fn test_fences_anywhere() {
        let text = "Here you go:\n```tsx\nlet a = 1;\n```\nand\n```css\np {}\n```";
        assert_eq!(strip_fences(text), "Here you go:\nlet a = 1;\nand\np {}");
    }

    #[test]
    fn test_only_fences() {
        assert_eq!(strip_fences("```html\n```"), "");
        assert_eq!(strip_fences(""), "");
    }

    #[test]
    fn test_inline_backticks_survive() {
        assert_eq!(strip_fences("let s = `a`;"), "let s = `a`;");
    }
}
