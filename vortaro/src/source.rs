//! ソース文書のツリー表現と探索
//!
//! このモジュールは、1つのソースファイルをパースして得られるノードツリー
//! [`SourceNode`] と、子要素の検索やテキスト抽出などの探索ヘルパーを提供します。
//!
//! ツリーはファイル単位で生成され、そのファイルのエントリを組み立てた後に破棄されます。

pub mod parser;
pub mod tag;

use crate::entity::EntityTable;

pub use crate::source::parser::parse_fragment;
pub use crate::source::tag::Tag;

/// ソースツリーのノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    /// 要素ノード
    Element(Element),
    /// テキストノード（未展開の生テキスト）
    Text(String),
}

impl SourceNode {
    /// 要素ノードであれば参照を返します。
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// ノードのテキストを抽出します。
    ///
    /// テキストノードは前後の空白を除去した値、要素ノードは [`Element::text`] の結果です。
    /// いずれもエンティティ参照が展開されます。
    pub fn text(&self, entities: &EntityTable) -> String {
        match self {
            Self::Element(element) => element.text(entities),
            Self::Text(value) => entities.resolve(value.trim()).into_owned(),
        }
    }
}

/// 要素ノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Tag,
    attrs: Vec<(String, String)>,
    children: Vec<SourceNode>,
}

impl Element {
    /// 子を持たない要素を作成します。
    pub fn new(tag: Tag, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attrs,
            children: vec![],
        }
    }

    /// 子ノードを末尾に追加します。
    pub fn push(&mut self, child: SourceNode) {
        self.children.push(child);
    }

    /// 子ノードを追加した要素を返します。
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.push(child);
        self
    }

    #[inline]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// 属性値を取得します。
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// すべての子ノードを文書順で返します。
    #[inline]
    pub fn children(&self) -> &[SourceNode] {
        &self.children
    }

    /// テキストノードを除いた子要素のイテレータを返します。
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(SourceNode::as_element)
    }

    /// 指定したタグを持つ最初の直接の子要素を返します。
    pub fn find_child_tag(&self, tag: &Tag) -> Option<&Element> {
        self.elements().find(|child| child.tag == *tag)
    }

    /// 指定したタグを持つ直接の子要素をすべて文書順で返します。
    pub fn find_all_child_tags<'a>(
        &'a self,
        tag: &Tag,
    ) -> impl Iterator<Item = &'a Element> + use<'a> {
        let tag = tag.clone();
        self.elements().filter(move |child| child.tag == tag)
    }

    /// 要素のテキストを抽出します。
    ///
    /// 直接の子テキストはそのまま、子要素は再帰的に抽出したテキストを連結し、
    /// 前後の空白を除去した後にエンティティ参照を展開します。
    pub fn text(&self, entities: &EntityTable) -> String {
        let mut raw = String::new();
        for child in &self.children {
            match child {
                SourceNode::Text(value) => raw.push_str(value),
                SourceNode::Element(element) => raw.push_str(&element.text(entities)),
            }
        }
        entities.resolve(raw.trim()).into_owned()
    }
}

/// 省略可能な要素のテキストを抽出します。要素がなければ空文字列を返します。
pub fn text_of(element: Option<&Element>, entities: &EntityTable) -> String {
    element.map_or_else(String::new, |element| element.text(entities))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> SourceNode {
        SourceNode::Text(value.to_string())
    }

    fn elem(tag: Tag, children: Vec<SourceNode>) -> Element {
        children
            .into_iter()
            .fold(Element::new(tag, vec![]), Element::with_child)
    }

    #[test]
    fn test_find_child_tag() {
        let snc = elem(
            Tag::Snc,
            vec![
                text("\n"),
                SourceNode::Element(elem(Tag::Ref, vec![text("unua")])),
                SourceNode::Element(elem(Tag::Dif, vec![text("difino")])),
                SourceNode::Element(elem(Tag::Ref, vec![text("dua")])),
            ],
        );
        let entities = EntityTable::default();
        assert_eq!(
            snc.find_child_tag(&Tag::Dif).unwrap().text(&entities),
            "difino"
        );
        assert!(snc.find_child_tag(&Tag::Rim).is_none());

        let refs: Vec<_> = snc
            .find_all_child_tags(&Tag::Ref)
            .map(|r| r.text(&entities))
            .collect();
        assert_eq!(refs, ["unua", "dua"]);
    }

    #[test]
    fn test_text_keeps_inner_spacing() {
        let dif = elem(
            Tag::Dif,
            vec![
                text("  iri "),
                SourceNode::Element(elem(Tag::Ref, vec![text(" post ")])),
                text(" iu  "),
            ],
        );
        assert_eq!(dif.text(&EntityTable::default()), "iri post iu");
    }

    #[test]
    fn test_text_resolves_entities() {
        let entities = EntityTable::parse(r#"<!ENTITY gxis "&#x011d;is">"#);
        let node = elem(Tag::Dif, vec![text("&gxis; revido")]);
        assert_eq!(node.text(&entities), "ĝis revido");
        assert_eq!(text(" &gxis; ").text(&entities), "ĝis");
    }

    #[test]
    fn test_text_of_missing_element() {
        assert_eq!(text_of(None, &EntityTable::default()), "");
    }

    #[test]
    fn test_attr() {
        let drv = Element::new(
            Tag::Drv,
            vec![("mrk".to_string(), "sekv.0i".to_string())],
        );
        assert_eq!(drv.attr("mrk"), Some("sekv.0i"));
        assert_eq!(drv.attr("lng"), None);
    }
}
