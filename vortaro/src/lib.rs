//! # Vortaro
//!
//! Vortaroは、Revo形式のエスペラント辞書ソース（XML）を、オフライン辞書ビューア向けの
//! 単一の辞書文書に変換するライブラリです。
//!
//! ## 概要
//!
//! 1つのソースファイルは1つの記事 `<art>` を表し、記事は語根と複数の派生語 `<drv>` から
//! なります。派生語ごとに、見出し語とその異形、屈折形の索引、訳語、語義（定義・用例・
//! 参照・注記）を含む辞書エントリを1つ生成します。
//!
//! ## 主な機能
//!
//! - **エンティティ展開**: DTDファイルの `<!ENTITY>` 宣言と数値文字参照の展開
//! - **見出し語の復元**: `<tld/>` による語根の代替と `<var>` による異形
//! - **屈折形の生成**: 語尾に基づく名詞・形容詞・動詞の屈折形
//! - **本文の生成**: 訳語・定義・用例・出典・参照・注記のマークアップ
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use vortaro::{Converter, DocumentWriter, EntityTable};
//!
//! let dtd = r#"<!ENTITY ccirc "&#x0109;">"#;
//! let article = r#"<?xml version="1.0"?>
//! <vortaro><art mrk="sekv">
//!   <kap><rad>sekv</rad>/i</kap>
//!   <drv mrk="sekv.0i">
//!     <kap><tld/>i</kap>
//!     <snc><dif>iri post iu</dif></snc>
//!     <trd lng="en">follow</trd>
//!   </drv>
//! </art></vortaro>"#;
//!
//! let converter = Converter::new(EntityTable::parse(dtd));
//! let entries = converter.convert_str(article)?;
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].id(), "sekv.0i");
//! assert_eq!(entries[0].title(), "sekvi");
//!
//! let mut wtr = DocumentWriter::new(vec![])?;
//! for entry in &entries {
//!     wtr.push(entry)?;
//! }
//! let doc = String::from_utf8(wtr.finish()?)?;
//! assert!(doc.contains("<d:index d:value=\"sekvas\" />"));
//! # Ok(())
//! # }
//! ```

/// 変換の設定
pub mod config;

/// ソース文書の変換器
pub mod converter;

/// 出力文書のライター
pub mod document;

/// エンティティ表
pub mod entity;

/// 辞書エントリと組み立て
pub mod entry;

/// エラー型の定義
pub mod errors;

/// 見出し語の組み立て
pub mod headword;

/// 屈折形の生成
pub mod inflection;

/// 出力マークアップのユーティリティ
pub mod markup;

/// 語義のコンパイル
pub mod sense;

/// ソースツリーとパーサー
pub mod source;

/// 訳語の抽出
pub mod translation;


// Re-exports
pub use config::ConvertConfig;
pub use converter::Converter;
pub use document::DocumentWriter;
pub use entity::EntityTable;
pub use entry::DictionaryEntry;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
