//! 語義のコンパイル
//!
//! `<snc>` 要素を、定義・用例（出典付き）・参照リスト・注記からなる出力マークアップに変換します。
//!
//! 出力は以下の順に連結されます。
//!
//! 1. `<p class="dif">` 定義（`<dif>` がある場合）
//! 2. `<ul class="ref-group">` 参照リスト（語義直下のグループ、続いて各 `<refgrp>`）
//! 3. `<p class="rim">` 注記（`<rim>` がある場合）

use std::iter;

use crate::entity::EntityTable;
use crate::markup::sanitize;
use crate::source::{Element, SourceNode, Tag};

/// 語義のコンパイラ
pub struct SenseCompiler<'a> {
    entities: &'a EntityTable,
}

impl<'a> SenseCompiler<'a> {
    pub fn new(entities: &'a EntityTable) -> Self {
        Self { entities }
    }

    /// 1つの語義をコンパイルします。
    ///
    /// # 引数
    ///
    /// * `snc` - 語義要素
    ///
    /// # 戻り値
    ///
    /// 出力マークアップ
    pub fn compile(&self, snc: &Element) -> String {
        let mut out = String::new();

        if let Some(dif) = snc.find_child_tag(&Tag::Dif) {
            self.compile_definition(dif, &mut out);
        }

        let groups = iter::once(snc).chain(snc.find_all_child_tags(&Tag::RefGrp));
        for group in groups {
            self.compile_reference_group(group, &mut out);
        }

        if let Some(rim) = snc.find_child_tag(&Tag::Rim) {
            out.push_str("<p class=\"rim\">");
            out.push_str(&self.sanitized(rim));
            out.push_str("</p>");
        }

        out
    }

    fn compile_definition(&self, dif: &Element, out: &mut String) {
        out.push_str("<p class=\"dif\">");
        for child in dif.children() {
            match child {
                SourceNode::Element(ekz) if *ekz.tag() == Tag::Ekz => {
                    self.compile_example(ekz, out);
                }
                _ => out.push_str(&self.sanitized_node(child)),
            }
        }
        out.push_str("</p>");
    }

    fn compile_example(&self, ekz: &Element, out: &mut String) {
        out.push_str("<p class=\"ekz\">");
        for child in ekz.children() {
            let SourceNode::Element(element) = child else {
                out.push_str(&self.sanitized_node(child));
                continue;
            };
            match element.tag() {
                Tag::Fnt => self.compile_citation(element, out),
                // translations belong to the derivative, not to single examples
                Tag::Trd | Tag::TrdGrp => {}
                _ => out.push_str(&self.sanitized(element)),
            }
        }
        out.push_str("</p>");
    }

    fn compile_citation(&self, fnt: &Element, out: &mut String) {
        out.push_str(" <span class=\"source\">");
        for child in fnt.children() {
            let class = match child {
                SourceNode::Element(element) => match element.tag() {
                    Tag::Aut => Some("author"),
                    Tag::Vrk => Some("work"),
                    Tag::Bib => Some("bib"),
                    Tag::Lok => Some("location"),
                    _ => None,
                },
                SourceNode::Text(_) => None,
            };
            let text = self.sanitized_node(child);
            match class {
                Some(class) => {
                    out.push_str("<span class=\"");
                    out.push_str(class);
                    out.push_str("\">");
                    out.push_str(&text);
                    out.push_str("</span>");
                }
                None => out.push_str(&text),
            }
        }
        out.push_str("</span>");
    }

    fn compile_reference_group(&self, group: &Element, out: &mut String) {
        out.push_str("<ul class=\"ref-group\">");
        for reference in group.find_all_child_tags(&Tag::Ref) {
            out.push_str("<li>");
            out.push_str(&self.sanitized(reference));
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }

    #[inline]
    fn sanitized(&self, element: &Element) -> String {
        sanitize(&element.text(self.entities))
    }

    #[inline]
    fn sanitized_node(&self, node: &SourceNode) -> String {
        sanitize(&node.text(self.entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::source::parse_fragment;

    fn compile(snc: &str) -> String {
        compile_with(&EntityTable::default(), snc)
    }

    fn compile_with(entities: &EntityTable, snc: &str) -> String {
        let fragment = parse_fragment(snc).unwrap();
        let snc = fragment.find_child_tag(&Tag::Snc).unwrap();
        SenseCompiler::new(entities).compile(snc)
    }

    #[test]
    fn test_empty_sense() {
        assert_eq!(compile("<snc></snc>"), "<ul class=\"ref-group\"></ul>");
    }

    #[test]
    fn test_definition() {
        assert_eq!(
            compile("<snc><dif>iri post</dif></snc>"),
            "<p class=\"dif\">iri post</p><ul class=\"ref-group\"></ul>"
        );
    }

    #[test]
    fn test_definition_is_sanitized() {
        assert_eq!(
            compile("<snc><dif>a &amp; b &lt; c</dif></snc>"),
            "<p class=\"dif\">a &amp; b &lt; c</p><ul class=\"ref-group\"></ul>"
        );
    }

    #[test]
    fn test_definition_resolves_entities() {
        let entities = EntityTable::parse(r#"<!ENTITY FE "Fundamento & Ekzercaro">"#);
        assert_eq!(
            compile_with(&entities, "<snc><dif>vidu &FE;</dif></snc>"),
            "<p class=\"dif\">vidu Fundamento &amp; Ekzercaro</p><ul class=\"ref-group\"></ul>"
        );
    }

    #[test]
    fn test_example_with_citation() {
        let snc = r#"<snc><dif>Iri post iu.
<ekz>la hundo <tld/>is la mastron<fnt><aut>Z</aut>, <vrk>Fabeloj</vrk><lok>1</lok></fnt><trd lng="en">x</trd></ekz>
</dif></snc>"#;
        assert_eq!(
            compile(snc),
            "<p class=\"dif\">Iri post iu.<p class=\"ekz\">la hundois la mastron \
             <span class=\"source\"><span class=\"author\">Z</span>,\
             <span class=\"work\">Fabeloj</span><span class=\"location\">1</span></span>\
             </p></p><ul class=\"ref-group\"></ul>"
        );
    }

    #[test]
    fn test_citation_bibliography() {
        let snc = "<snc><dif><ekz>teksto<fnt><bib>PIV</bib><klr>nova</klr></fnt></ekz></dif></snc>";
        assert_eq!(
            compile(snc),
            "<p class=\"dif\"><p class=\"ekz\">teksto <span class=\"source\">\
             <span class=\"bib\">PIV</span>nova</span></p></p><ul class=\"ref-group\"></ul>"
        );
    }

    #[test]
    fn test_reference_groups() {
        let snc = r#"<snc><ref cel="ir.0i">iri</ref>
<refgrp tip="vid"><ref>postiri</ref><ref>&lt;x&gt;</ref></refgrp>
<refgrp><ref>akompani</ref></refgrp></snc>"#;
        assert_eq!(
            compile(snc),
            "<ul class=\"ref-group\"><li>iri</li></ul>\
             <ul class=\"ref-group\"><li>postiri</li><li>&lt;x&gt;</li></ul>\
             <ul class=\"ref-group\"><li>akompani</li></ul>"
        );
    }

    #[test]
    fn test_remark() {
        assert_eq!(
            compile("<snc><dif>d</dif><rim>Ofte <ref>x</ref> &amp; y</rim></snc>"),
            "<p class=\"dif\">d</p><ul class=\"ref-group\"></ul><p class=\"rim\">Ofte x &amp; y</p>"
        );
    }
}
