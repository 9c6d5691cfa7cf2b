use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{PostcraftError, Result};

/// Symbol pools a decoration can be drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Title,
    Section,
    Highlight,
}

/// Symbols and closing templates used to decorate a post
///
/// Every pick is an independent uniform draw from the caller's RNG; the set
/// itself holds no state between posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationSet {
    /// Wraps the title on both sides
    pub title: Vec<String>,
    /// Prefixes each list item
    pub section: Vec<String>,
    /// Fallback pool for empty pools
    pub highlight: Vec<String>,
    /// Closing call-to-action templates, each starting with its own blank line
    pub endings: Vec<String>,
}

impl Default for DecorationSet {
    fn default() -> Self {
        Self {
            title: to_strings(&["✨", "🌟", "💫", "⭐️", "🎯"]),
            section: to_strings(&["📌", "💡", "🔥", "👉", "✅"]),
            highlight: to_strings(&["⚡️", "💪", "🎉", "🌈", "💖"]),
            endings: to_strings(&[
                "\n\n✨ 喜欢的话记得点赞收藏哦～",
                "\n\n💖 觉得有用的话给个小心心吧",
                "\n\n🌟 有问题欢迎评论区交流～",
                "\n\n⭐️ 关注我，分享更多干货内容",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DecorationSet {
    fn pool(&self, pool: Pool) -> &[String] {
        match pool {
            Pool::Title => &self.title,
            Pool::Section => &self.section,
            Pool::Highlight => &self.highlight,
        }
    }

    /// Draws a symbol from `pool`.
    ///
    /// An empty pool falls back to `highlight`; if that is empty too the
    /// symbol is the empty string.
    pub fn pick<R: Rng + ?Sized>(&self, pool: Pool, rng: &mut R) -> &str {
        self.pool(pool)
            .choose(rng)
            .or_else(|| self.highlight.choose(rng))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Draws a closing template.
    pub fn ending<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.endings.choose(rng).map(String::as_str).unwrap_or_default()
    }

    /// Checks that every pool is populated and the symbol pools are disjoint.
    pub fn validate(&self) -> Result<()> {
        let named = [("title", &self.title), ("section", &self.section), ("highlight", &self.highlight)];

        for (name, symbols) in &named {
            if symbols.is_empty() {
                return Err(PostcraftError::ConfigError(format!("decoration pool '{name}' is empty")));
            }
        }
        if self.endings.is_empty() {
            return Err(PostcraftError::ConfigError("decoration endings are empty".to_string()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (name, symbols) in &named {
            let own: HashSet<&str> = symbols.iter().map(String::as_str).collect();
            if let Some(shared) = own.iter().find(|s| seen.contains(*s)) {
                return Err(PostcraftError::ConfigError(format!(
                    "symbol {shared:?} in pool '{name}' also appears in another pool"
                )));
            }
            seen.extend(own);
        }

        Ok(())
    }
}
