//! 辞書エントリの組み立て
//!
//! 記事 `<art>` の各派生語 `<drv>` から、識別子・表示タイトル・索引形・本文マークアップを持つ
//! [`DictionaryEntry`] を1つずつ組み立てます。

use std::io::Write;

use hashbrown::HashSet;

use crate::config::ConvertConfig;
use crate::entity::EntityTable;
use crate::errors::{Result, VortaroError};
use crate::headword::HeadwordCombiner;
use crate::inflection::inflect;
use crate::markup::{escape_quotes, title_text};
use crate::sense::SenseCompiler;
use crate::source::{Element, Tag, text_of};
use crate::translation::TranslationSet;

/// 出力文書の1エントリ
///
/// 組み立て後は変更されません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    id: String,
    title: String,
    index: Vec<String>,
    content: String,
}

impl DictionaryEntry {
    /// 新しいエントリを作成します。
    ///
    /// # 引数
    ///
    /// * `id` - 文書内で一意な識別子
    /// * `title` - 表示タイトル（二重引用符を含まないこと）
    /// * `index` - 索引形（重複を含んでよい）
    /// * `content` - 本文マークアップ
    pub fn new(id: String, title: String, index: Vec<String>, content: String) -> Self {
        Self {
            id,
            title,
            index,
            content,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 生成順の索引形。重複は除かれていません。
    #[inline]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// エントリを `<d:entry>` ブロックとして書き出します。
    pub fn write<W>(&self, mut wtr: W) -> std::io::Result<()>
    where
        W: Write,
    {
        wtr.write_all(self.to_markup().as_bytes())
    }

    /// エントリのマークアップを文字列として返します。
    ///
    /// 索引形は最初に生成された順で、同じ値は1回だけ出力します。
    pub fn to_markup(&self) -> String {
        let mut out = format!("<d:entry id=\"{}\" d:title=\"{}\">", self.id, self.title);
        let mut seen = HashSet::new();
        for value in &self.index {
            if seen.insert(value.as_str()) {
                out.push_str("<d:index d:value=\"");
                out.push_str(value);
                out.push_str("\" />");
            }
        }
        out.push_str(&self.content);
        out.push_str("</d:entry>\n");
        out
    }
}

/// 記事からエントリを組み立てるアセンブラ
pub struct EntryAssembler<'a> {
    entities: &'a EntityTable,
    config: &'a ConvertConfig,
}

impl<'a> EntryAssembler<'a> {
    pub fn new(entities: &'a EntityTable, config: &'a ConvertConfig) -> Self {
        Self { entities, config }
    }

    /// パース済みのソース文書から、すべての派生語のエントリを文書順で組み立てます。
    ///
    /// 見出し語を復元できない派生語と `mrk` 属性を持たない派生語は読み飛ばします。
    ///
    /// # エラー
    ///
    /// `<vortaro>` または `<art>` 要素が見つからない場合、
    /// [`VortaroError::InvalidFormat`] を返します。
    pub fn assemble_article(&self, fragment: &Element) -> Result<Vec<DictionaryEntry>> {
        let vortaro = fragment.find_child_tag(&Tag::Vortaro).ok_or_else(|| {
            VortaroError::invalid_format("source", "missing <vortaro> element")
        })?;
        let art = vortaro
            .find_child_tag(&Tag::Art)
            .ok_or_else(|| VortaroError::invalid_format("source", "missing <art> element"))?;

        let rad = art
            .find_child_tag(&Tag::Kap)
            .and_then(|kap| kap.find_child_tag(&Tag::Rad));
        let root = text_of(rad, self.entities);

        Ok(art
            .find_all_child_tags(&Tag::Drv)
            .filter_map(|drv| self.assemble_derivative(&root, drv))
            .collect())
    }

    /// 1つの派生語からエントリを組み立てます。
    ///
    /// # 引数
    ///
    /// * `root` - 記事の語根
    /// * `drv` - 派生語要素
    ///
    /// # 戻り値
    ///
    /// 見出し語が空の場合、または `mrk` 属性がない場合は `None`
    pub fn assemble_derivative(&self, root: &str, drv: &Element) -> Option<DictionaryEntry> {
        let Some(id) = drv.attr("mrk") else {
            log::warn!("derivative of root '{root}' has no mrk attribute; skipping");
            return None;
        };

        let combiner = HeadwordCombiner::new(self.entities, self.config.max_nesting_depth);
        let headwords = drv
            .find_child_tag(&Tag::Kap)
            .map(|kap| combiner.combine(root, kap))
            .unwrap_or_default();
        let Some(canonical) = headwords.first().filter(|word| !word.is_empty()) else {
            log::warn!("derivative '{id}' has no resolvable headword; skipping");
            return None;
        };

        let title = title_text(canonical);
        let index = headwords
            .iter()
            .flat_map(|word| inflect(&escape_quotes(word)))
            .collect();

        let mut content = format!("<h1>{}</h1>", headwords.join(", "));

        let translations = TranslationSet::from_derivative(drv, self.entities);
        if let Some(words) = translations.get(&self.config.primary_language) {
            content.push_str("<p class=\"translations\">");
            content.push_str(&words.join(", "));
            content.push_str("</p>");
        }

        let sense_compiler = SenseCompiler::new(self.entities);
        for snc in drv.find_all_child_tags(&Tag::Snc) {
            content.push_str(&sense_compiler.compile(snc));
        }

        log::debug!("assembled entry '{id}' ({title})");
        Some(DictionaryEntry::new(id.to_string(), title, index, content))
    }
}
