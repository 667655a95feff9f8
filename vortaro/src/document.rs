//! 出力文書の書き出し
//!
//! 辞書エントリを、ヘッダ・エントリ列・フッタからなる1つの出力文書として書き出します。

use std::io::{BufWriter, Write};

use crate::entry::DictionaryEntry;
use crate::errors::Result;

/// 出力文書の先頭
pub const DOCUMENT_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!-- generated file -->\n\
<d:dictionary xmlns=\"http://www.w3.org/1999/xhtml\" \
xmlns:d=\"http://www.apple.com/DTDs/DictionaryService-1.0.rng\">\n";

/// 出力文書の末尾
pub const DOCUMENT_FOOTER: &str = "</d:dictionary>\n";

/// 出力文書のライター
///
/// 作成時にヘッダを書き出し、[`DocumentWriter::finish`] でフッタを書き出します。
/// エントリは追加された順に書き出されます。
pub struct DocumentWriter<W>
where
    W: Write,
{
    wtr: BufWriter<W>,
    num_entries: usize,
}

impl<W> DocumentWriter<W>
where
    W: Write,
{
    /// 新しいライターを作成し、ヘッダを書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、[`VortaroError`](crate::errors::VortaroError)が返されます。
    pub fn new(wtr: W) -> Result<Self> {
        let mut wtr = BufWriter::new(wtr);
        wtr.write_all(DOCUMENT_HEADER.as_bytes())?;
        Ok(Self {
            wtr,
            num_entries: 0,
        })
    }

    /// エントリを1つ書き出します。
    pub fn push(&mut self, entry: &DictionaryEntry) -> Result<()> {
        entry.write(&mut self.wtr)?;
        self.num_entries += 1;
        Ok(())
    }

    /// これまでに書き出したエントリの数を返します。
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// フッタを書き出して文書を閉じ、内部のライターを返します。
    pub fn finish(mut self) -> Result<W> {
        self.wtr.write_all(DOCUMENT_FOOTER.as_bytes())?;
        self.wtr.flush()?;
        self.wtr
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let wtr = DocumentWriter::new(vec![]).unwrap();
        assert_eq!(wtr.num_entries(), 0);
        let buf = wtr.finish().unwrap();
        let doc = String::from_utf8(buf).unwrap();
        assert_eq!(doc, format!("{DOCUMENT_HEADER}{DOCUMENT_FOOTER}"));
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(doc.ends_with("</d:dictionary>\n"));
    }

    #[test]
    fn test_entries_in_order() {
        let first = DictionaryEntry::new(
            "a.0o".to_string(),
            "ao".to_string(),
            vec!["ao".to_string()],
            "<h1>ao</h1>".to_string(),
        );
        let second = DictionaryEntry::new(
            "b.0o".to_string(),
            "bo".to_string(),
            vec![],
            "<h1>bo</h1>".to_string(),
        );

        let mut wtr = DocumentWriter::new(vec![]).unwrap();
        wtr.push(&first).unwrap();
        wtr.push(&second).unwrap();
        assert_eq!(wtr.num_entries(), 2);
        let doc = String::from_utf8(wtr.finish().unwrap()).unwrap();

        let a = doc.find("id=\"a.0o\"").unwrap();
        let b = doc.find("id=\"b.0o\"").unwrap();
        assert!(a < b);
        assert!(doc.contains("<d:entry id=\"b.0o\" d:title=\"bo\"><h1>bo</h1></d:entry>"));
    }
}
