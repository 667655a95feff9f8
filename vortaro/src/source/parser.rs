//! ソース文書のパーサー
//!
//! `quick-xml` のイベントストリームから所有権を持つ [`SourceNode`] ツリーを構築します。
//! エンティティ参照は外部DTDで宣言されているため、ここでは展開せず生テキストのまま保持します。

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::errors::{Result, VortaroError};
use crate::source::{Element, SourceNode, Tag};

/// ソース文書をパースし、最上位ノードを [`Tag::Fragment`] 要素にまとめて返します。
///
/// コメント、処理命令、XML宣言、DOCTYPEは読み捨てます。
///
/// # エラー
///
/// 終了タグの不一致、閉じられていない要素、不正なUTF-8の場合にエラーを返します。
///
/// # 例
///
/// ```
/// use vortaro::source::{parse_fragment, Tag};
///
/// let root = parse_fragment("<vortaro><art><kap><rad>sekv</rad></kap></art></vortaro>")?;
/// let art = root
///     .find_child_tag(&Tag::Vortaro)
///     .and_then(|v| v.find_child_tag(&Tag::Art));
/// assert!(art.is_some());
/// # Ok::<(), vortaro::errors::VortaroError>(())
/// ```
pub fn parse_fragment(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack = vec![Element::new(Tag::Fragment, vec![])];
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                push_child(&mut stack, SourceNode::Element(element))?;
            }
            Event::End(_) => {
                let element = stack.pop().filter(|_| !stack.is_empty()).ok_or_else(|| {
                    VortaroError::invalid_format("source", "unexpected end tag")
                })?;
                push_child(&mut stack, SourceNode::Element(element))?;
            }
            Event::Text(text) => {
                let value = std::str::from_utf8(&text)?;
                push_child(&mut stack, SourceNode::Text(value.to_string()))?;
            }
            Event::CData(data) => {
                let value = std::str::from_utf8(&data)?;
                push_child(&mut stack, SourceNode::Text(value.to_string()))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let root = stack.pop();
    match (root, stack.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err(VortaroError::invalid_format(
            "source",
            "document ends inside an unclosed element",
        )),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    let mut attrs = vec![];
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        attrs.push((key.to_string(), value.to_string()));
    }
    Ok(Element::new(Tag::from_name(name), attrs))
}

fn push_child(stack: &mut [Element], child: SourceNode) -> Result<()> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| VortaroError::invalid_format("source", "node outside of any element"))?;
    parent.push(child);
    Ok(())
}
