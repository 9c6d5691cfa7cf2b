use rand::Rng;

use crate::classify::{LineKind, classify_line, strip_list_marker};
use crate::decoration::{DecorationSet, Pool};

/// Decorated social post formatter
///
/// The first non-empty line becomes the title, wrapped in a title symbol.
/// List items get a section symbol in place of their marker and stay tight;
/// paragraphs are separated by blank lines. A closing call-to-action is
/// appended at the end.
#[derive(Debug, Clone, Default)]
pub struct PostFormatter {
    decorations: DecorationSet,
}

impl PostFormatter {
    pub fn new(decorations: DecorationSet) -> Self {
        Self { decorations }
    }

    /// Format with the thread-local RNG.
    pub fn format(&self, text: &str) -> String {
        self.format_with_rng(text, &mut rand::thread_rng())
    }

    /// Format drawing every decoration from `rng`.
    ///
    /// Empty or whitespace-only input yields an empty string.
    pub fn format_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let Some(title) = lines.next() else {
            return String::new();
        };

        let mut output = String::new();
        let mut previous = LineKind::Title;

        let symbol = self.decorations.pick(Pool::Title, rng);
        output.push_str(&format!("{symbol} {title} {symbol}\n\n"));

        for line in lines {
            match classify_line(line) {
                LineKind::ListItem => {
                    if previous != LineKind::ListItem {
                        ensure_blank_line(&mut output);
                    }
                    let symbol = self.decorations.pick(Pool::Section, rng);
                    output.push_str(&format!("{symbol} {}\n", strip_list_marker(line)));
                    previous = LineKind::ListItem;
                }
                _ => {
                    output.push_str(line);
                    output.push_str("\n\n");
                    previous = LineKind::Paragraph;
                }
            }
        }

        let body_len = output.trim_end().len();
        output.truncate(body_len);
        output.push_str(self.decorations.ending(rng));

        output.trim().to_string()
    }
}

/// Make `output` end with exactly one blank line, never more.
fn ensure_blank_line(output: &mut String) {
    while !output.ends_with("\n\n") {
        output.push('\n');
    }
}

/// Format with the default decorations and the thread-local RNG.
pub fn format_post(text: &str) -> String {
    PostFormatter::default().format(text)
}

/// Format with the default decorations and a caller-supplied RNG.
pub fn format_post_with_rng<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    PostFormatter::default().format_with_rng(text, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn first_choice() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_post(""), "");
        assert_eq!(format_post("   \n\n  "), "");
    }

    #[test]
    fn test_title_list_paragraph() {
        let text = "My Title\n- point one\n- point two\nA paragraph.";
        let post = format_post_with_rng(text, &mut first_choice());

        assert_eq!(
            post,
            "✨ My Title ✨\n\n📌 point one\n📌 point two\nA paragraph.\n\n✨ 喜欢的话记得点赞收藏哦～"
        );
    }

    #[test]
    fn test_list_after_paragraph_gets_single_blank_line() {
        let text = "Title\nIntro paragraph\n1. one\n2) two\nOutro";
        let post = format_post_with_rng(text, &mut first_choice());

        assert_eq!(
            post,
            "✨ Title ✨\n\nIntro paragraph\n\n📌 one\n📌 two\nOutro\n\n✨ 喜欢的话记得点赞收藏哦～"
        );
    }

    #[test]
    fn test_numbered_marker_fully_stripped() {
        let post = format_post_with_rng("Title\n3) Third step", &mut first_choice());

        assert!(post.contains("📌 Third step\n"));
        assert!(!post.contains(')'));
    }

    #[test]
    fn test_title_only() {
        let post = format_post_with_rng("  Only a title  ", &mut first_choice());
        assert_eq!(post, "✨ Only a title ✨\n\n✨ 喜欢的话记得点赞收藏哦～");
    }

    #[test]
    fn test_first_line_is_title_even_if_list_shaped() {
        let post = format_post_with_rng("- not a list\nbody", &mut first_choice());
        assert!(post.starts_with("✨ - not a list ✨\n\n"));
    }

    #[test]
    fn test_never_three_newlines() {
        let text = "T\n\n\n- a\n\n\npara\n* b\n\n- c\nend para\n\n\n";
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..20 {
            let post = format_post_with_rng(text, &mut rng);
            assert!(!post.contains("\n\n\n"), "{post:?}");
        }
    }

    #[test]
    fn test_structure_with_random_decorations() {
        let set = DecorationSet::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let post = format_post_with_rng("My Title\n- point one\n- point two\nA paragraph.", &mut rng);
        let lines: Vec<&str> = post.lines().collect();

        let title_symbol = set.title.iter().find(|s| lines[0].starts_with(s.as_str())).unwrap();
        assert!(lines[0].ends_with(title_symbol.as_str()));
        assert_eq!(lines[1], "");
        assert!(set.section.iter().any(|s| lines[2] == format!("{s} point one")));
        assert!(set.section.iter().any(|s| lines[3] == format!("{s} point two")));
        assert_eq!(lines[4], "A paragraph.");
        assert_eq!(set.endings.iter().filter(|e| post.ends_with(e.trim_start())).count(), 1);
    }

    #[test]
    fn test_same_seed_same_output() {
        let text = "Title\n- a\n- b\nParagraph";
        let a = format_post_with_rng(text, &mut StdRng::seed_from_u64(5));
        let b = format_post_with_rng(text, &mut StdRng::seed_from_u64(5));

        assert_eq!(a, b);
    }
}
