//! 訳語の抽出
//!
//! 派生語の直下にある `<trd>` / `<trdgrp>` 要素から、言語コードごとの訳語リストを作成します。

use hashbrown::HashMap;

use crate::entity::EntityTable;
use crate::source::{Element, Tag};

/// 言語コードから訳語リストへの対応
///
/// 空のリストは登録されません。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    by_language: HashMap<String, Vec<String>>,
}

impl TranslationSet {
    /// 派生語要素から訳語を抽出します。
    ///
    /// `lng` 属性を持たない訳語要素は無視します。`<trd>` はその全テキストを1語とし、
    /// `<trdgrp>` などのグループは各子ノードを1語とします。
    /// 空文字列と単独のカンマ（区切り記号の残骸）は取り除きます。
    /// 同じ言語の訳語要素が複数ある場合は文書順に連結します。
    pub fn from_derivative(drv: &Element, entities: &EntityTable) -> Self {
        let mut set = Self::default();
        for child in drv.elements().filter(|child| child.tag().is_translation()) {
            let Some(lang) = child.attr("lng") else {
                continue;
            };
            let words: Vec<String> = match child.tag() {
                Tag::Trd => vec![child.text(entities)],
                _ => child
                    .children()
                    .iter()
                    .map(|word| word.text(entities))
                    .collect(),
            };
            set.extend(lang, words);
        }
        set
    }

    fn extend(&mut self, lang: &str, words: Vec<String>) {
        let mut words = words
            .into_iter()
            .filter(|word| !word.is_empty() && word != ",")
            .peekable();
        if words.peek().is_none() {
            return;
        }
        self.by_language
            .entry(lang.to_string())
            .or_default()
            .extend(words);
    }

    /// 指定した言語の訳語を返します。
    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.by_language.get(lang).map(Vec::as_slice)
    }

    /// 訳語が登録されている言語の数を返します。
    pub fn len(&self) -> usize {
        self.by_language.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }

    /// 訳語が登録されている言語コードを返します。順序は不定です。
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.by_language.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::source::parse_fragment;

    fn compile(drv: &str) -> TranslationSet {
        let fragment = parse_fragment(drv).unwrap();
        let drv = fragment.find_child_tag(&Tag::Drv).unwrap();
        TranslationSet::from_derivative(drv, &EntityTable::default())
    }

    #[test]
    fn test_single_translation() {
        let set = compile(r#"<drv><trd lng="en">follow</trd><trd lng="de">folgen</trd></drv>"#);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("en").unwrap(), ["follow"]);
        assert_eq!(set.get("de").unwrap(), ["folgen"]);
        assert!(set.get("fr").is_none());
    }

    #[test]
    fn test_translation_group() {
        let set = compile(
            r#"<drv><trdgrp lng="en">
  <trd>follow</trd>,
  <trd>pursue</trd>
</trdgrp></drv>"#,
        );
        assert_eq!(set.get("en").unwrap(), ["follow", "pursue"]);
    }

    #[test]
    fn test_missing_language_skipped() {
        let set = compile("<drv><trd>follow</trd></drv>");
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_translation_not_recorded() {
        let set = compile(r#"<drv><trd lng="en"> </trd><trdgrp lng="fr">, </trdgrp></drv>"#);
        assert!(set.is_empty());
    }

    #[test]
    fn test_repeated_language_concatenated() {
        let set = compile(r#"<drv><trd lng="en">follow</trd><trd lng="en">succeed</trd></drv>"#);
        assert_eq!(set.get("en").unwrap(), ["follow", "succeed"]);
    }

    #[test]
    fn test_nested_translations_ignored() {
        let set = compile(r#"<drv><snc><trd lng="en">follow</trd></snc></drv>"#);
        assert!(set.is_empty());
    }
}
