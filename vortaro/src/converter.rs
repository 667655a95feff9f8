//! ソース文書から辞書エントリへの変換器
//!
//! # 例
//!
//! ```
//! use vortaro::{Converter, EntityTable};
//!
//! let entities = EntityTable::parse(r#"<!ENTITY ccirc "&#x0109;">"#);
//! let converter = Converter::new(entities).primary_language("en")?;
//!
//! let entries = converter.convert_str(
//!     r#"<vortaro><art><kap><rad>&ccirc;ef</rad></kap>
//!     <drv mrk="cxef.0o"><kap><tld/>o</kap><trd lng="en">chief</trd></drv>
//!     </art></vortaro>"#,
//! )?;
//! assert_eq!(entries[0].title(), "ĉefo");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use std::io::Read;

use crate::config::ConvertConfig;
use crate::entity::EntityTable;
use crate::entry::{DictionaryEntry, EntryAssembler};
use crate::errors::{Result, VortaroError};
use crate::source::parse_fragment;

/// ソース文書を辞書エントリに変換する変換器
///
/// エンティティ表と設定を保持します。構築後は読み取り専用で、
/// 同じ変換器で任意の数のソース文書を変換できます。
#[derive(Debug, Clone)]
pub struct Converter {
    entities: EntityTable,
    config: ConvertConfig,
}

impl Converter {
    /// 既定の設定で新しい変換器を作成します。
    ///
    /// # 引数
    ///
    /// * `entities` - 本文の展開に使うエンティティ表
    pub fn new(entities: EntityTable) -> Self {
        Self {
            entities,
            config: ConvertConfig::default(),
        }
    }

    /// エンティティ定義のリーダーから変換器を作成します。
    ///
    /// # エラー
    ///
    /// 定義の読み込みに失敗した場合、[`VortaroError`]が返されます。
    pub fn from_readers<I, R>(rdrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        Ok(Self::new(EntityTable::from_readers(rdrs)?))
    }

    /// 見出しの直後に表示する訳語の言語を指定します。
    ///
    /// デフォルトは `en` です。
    ///
    /// # エラー
    ///
    /// 空の言語コードを指定した場合、[`VortaroError`]が返されます。
    pub fn primary_language<S>(mut self, lang: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let lang = lang.into();
        if lang.trim().is_empty() {
            return Err(VortaroError::invalid_argument(
                "primary_language",
                "must not be empty",
            ));
        }
        self.config.primary_language = lang;
        Ok(self)
    }

    /// 入れ子になった見出し語の異形をたどる最大の深さを指定します。
    ///
    /// # エラー
    ///
    /// `0` を指定した場合、[`VortaroError`]が返されます。
    pub fn max_nesting_depth(mut self, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(VortaroError::invalid_argument(
                "max_nesting_depth",
                "must be at least 1",
            ));
        }
        self.config.max_nesting_depth = depth;
        Ok(self)
    }

    #[inline]
    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    #[inline]
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// 1つのソース文書を変換し、派生語ごとのエントリを文書順で返します。
    ///
    /// # エラー
    ///
    /// 文書がXMLとして不正な場合、または `<vortaro>` / `<art>` 要素が欠けている場合、
    /// [`VortaroError`]が返されます。
    pub fn convert_str(&self, xml: &str) -> Result<Vec<DictionaryEntry>> {
        let fragment = parse_fragment(xml)?;
        EntryAssembler::new(&self.entities, &self.config).assemble_article(&fragment)
    }

    /// リーダーから1つのソース文書を読み込んで変換します。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、またはUTF-8として不正な場合にもエラーを返します。
    pub fn convert_reader<R>(&self, mut rdr: R) -> Result<Vec<DictionaryEntry>>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let xml = std::str::from_utf8(&buf)?;
        self.convert_str(xml)
    }
}
