//! 見出し語の組み立て
//!
//! ソースの見出し `<kap>` は、語根を `<tld/>` で代替し、その前後に接頭・接尾の断片を
//! 並べる形で記述されます。このモジュールは断片と語根から完全な見出し語と、
//! `<var>` に列挙された異形を復元します。

use crate::entity::EntityTable;
use crate::source::{Element, SourceNode, Tag};

/// 見出し語の組み立て器
pub struct HeadwordCombiner<'a> {
    entities: &'a EntityTable,
    max_depth: usize,
}

impl<'a> HeadwordCombiner<'a> {
    /// 新しい組み立て器を作成します。
    ///
    /// # 引数
    ///
    /// * `entities` - テキスト抽出に使うエンティティ表
    /// * `max_depth` - 入れ子になった異形をたどる最大の深さ
    pub fn new(entities: &'a EntityTable, max_depth: usize) -> Self {
        Self { entities, max_depth }
    }

    /// 見出しから見出し語とその異形を組み立てます。
    ///
    /// 先頭の要素が正規形で、以降は `<var>` 内の文書順に並ぶ異形です。
    /// `<var>` が複数ある場合は、それらを文書順に連結して扱います。
    /// `<tld/>` を含まない見出しは複数の独立した語を列挙したものとみなし、
    /// カンマで分割した語のリストを返します。
    ///
    /// `<fnt>` と `<ofc>` の内容は見出し語に含めません。
    /// 正規形と異形は、前後のカンマと空白を取り除いた形で返します。
    ///
    /// # 引数
    ///
    /// * `root` - 記事の語根
    /// * `kap` - 派生語の見出し要素
    pub fn combine(&self, root: &str, kap: &Element) -> Vec<String> {
        self.combine_at(root.trim(), kap, self.max_depth)
    }

    fn combine_at(&self, root: &str, kap: &Element, depth: usize) -> Vec<String> {
        let mut before = String::new();
        let mut after = String::new();
        let mut has_placeholder = false;

        for child in kap.children() {
            let text = match child {
                SourceNode::Element(element) => match element.tag() {
                    // TODO: render footnotes in headwords once multi-author citations are supported
                    Tag::Fnt | Tag::Ofc | Tag::Var => continue,
                    Tag::Tld => {
                        has_placeholder = true;
                        continue;
                    }
                    _ => element.text(self.entities),
                },
                SourceNode::Text(_) => child.text(self.entities),
            };
            if has_placeholder {
                after.push_str(&text);
            } else {
                before.push_str(&text);
            }
        }

        if !has_placeholder {
            return split_headwords(&before);
        }

        let canonical = trim_separators(&format!("{before}{root}{after}")).to_string();
        let mut variants = vec![canonical];

        if kap.find_child_tag(&Tag::Var).is_none() {
            return variants;
        }
        if depth == 0 {
            log::warn!(
                "variants of '{}' are nested too deeply; ignoring them",
                variants[0]
            );
            return variants;
        }
        for child in kap
            .find_all_child_tags(&Tag::Var)
            .flat_map(Element::elements)
        {
            let Some(first) = self.combine_at(root, child, depth - 1).into_iter().next() else {
                continue;
            };
            let variant = trim_separators(&first);
            if !variant.is_empty() {
                variants.push(variant.to_string());
            }
        }
        variants
    }
}

/// カンマ区切りの見出し語を分割し、空の断片を除きます。
fn split_headwords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// 前後のカンマと空白を取り除きます。
fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c == ',' || c.is_whitespace())
}
