//! Line-level cleanup of extracted page text.
//!
//! Document editors render plenty of chrome inside or next to the document
//! body: share buttons, "last modified" stamps, comment counters, code block
//! toolbars. [`NoiseFilter`] drops every line containing one of those known
//! UI strings, drops stray glyph lines, and normalizes whitespace.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// UI strings of the Feishu/Lark document editor.
///
/// Matching is case-sensitive substring containment.
pub const DEFAULT_UI_NOISE: [&str; 22] = [
    "ByteDance",
    "最近修改:",
    "文档内容请保持\"公开可接受\"",
    "分享",
    "编辑",
    "添加图标",
    "添加封面",
    "评论（",
    "反向引用",
    "本文引用",
    "关系图",
    "推荐内容由 AI 生成",
    "真诚点赞，手留余香",
    "上传日志",
    "联系客服",
    "功能更新",
    "帮助中心",
    "效率指南",
    "代码块",
    "取消自动换行",
    "复制",
    "自动换行",
];

/// Configuration for the UI-noise filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseFilter {
    /// Lines containing any of these substrings are dropped
    pub patterns: Vec<String>,
    /// Lines shorter than this many characters (after trimming) are dropped
    pub min_line_length: usize,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self { patterns: DEFAULT_UI_NOISE.iter().map(|s| s.to_string()).collect(), min_line_length: 2 }
    }
}

impl NoiseFilter {
    /// Creates a filter from an explicit vocabulary.
    pub fn new<I, S>(patterns: I, min_line_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(Into::into).collect(), min_line_length }
    }

    /// Whether a single line should be removed.
    pub fn is_noise(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.chars().count() < self.min_line_length {
            return true;
        }
        self.patterns.iter().any(|p| !p.is_empty() && trimmed.contains(p.as_str()))
    }

    /// Filters noise lines out of `text` and normalizes whitespace.
    ///
    /// Line breaks are normalized to `\n`, runs of spaces and tabs become a
    /// single space, runs of three or more newlines become two, and the result
    /// is trimmed. Applying `clean` to its own output changes nothing.
    pub fn clean(&self, text: &str) -> String {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        let kept: Vec<String> = normalized
            .split('\n')
            .map(|line| HORIZONTAL_SPACE.replace_all(line, " ").into_owned())
            .filter(|line| !self.is_noise(line))
            .collect();

        let joined = kept.join("\n");
        EXCESS_NEWLINES.replace_all(&joined, "\n\n").trim().to_string()
    }
}
