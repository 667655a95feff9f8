//! エンティティの解決
//!
//! このモジュールは、DTDファイルに宣言された `<!ENTITY name "...">` 形式の
//! エンティティを読み込み、本文中の `&name;` 参照と数値文字参照を展開する
//! [`EntityTable`] を提供します。
//!
//! テーブルは変換の開始前に一度だけ構築され、以後は読み取り専用です。

use std::borrow::Cow;
use std::io::Read;
use std::sync::LazyLock;

use hashbrown::HashMap;
use regex::{Captures, Regex};

use crate::errors::Result;

static DECLARATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<!ENTITY\s+(\w+)\s+"(.+?)"\s*>"#).unwrap());

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(\w+);").unwrap());

static NUMERIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));").unwrap());

/// 数値文字参照を展開する最小のコードポイント
///
/// これより小さい値は制御文字とみなし、参照のまま残します。
pub const PRINTABLE_THRESHOLD: u32 = 0x20;

/// エンティティ内エンティティを展開する最大の深さ
pub const MAX_NESTING_DEPTH: usize = 8;

/// エンティティ名から置換文字列への対応表
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntityTable {
    entries: HashMap<String, String>,
}

impl EntityTable {
    /// 宣言テキストからテーブルを構築します。
    ///
    /// 1パス目で宣言をそのまま記録し、2パス目で値に含まれる `&name;` 参照を
    /// テーブル内の値で置き換えます。自己参照と未定義の名前は展開されません。
    /// 同じ名前が複数回宣言された場合は後の宣言が優先されます。
    ///
    /// # 引数
    ///
    /// * `text` - `<!ENTITY ...>` 宣言を含むテキスト
    pub fn parse(text: &str) -> Self {
        let mut raw = HashMap::new();
        for caps in DECLARATION_PATTERN.captures_iter(text) {
            raw.insert(caps[1].to_string(), caps[2].to_string());
        }

        let entries = raw
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    Self::expand(&raw, name, value, MAX_NESTING_DEPTH),
                )
            })
            .collect();

        Self { entries }
    }

    /// リーダーから宣言テキストを読み込み、テーブルを構築します。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、またはUTF-8として不正な場合にエラーを返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Self::from_readers([rdr])
    }

    /// 複数の定義ソースを連結してテーブルを構築します。
    ///
    /// # 引数
    ///
    /// * `rdrs` - DTDファイルなどのリーダーのイテレータ
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、またはUTF-8として不正な場合にエラーを返します。
    pub fn from_readers<I, R>(rdrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut buf = vec![];
        for mut rdr in rdrs {
            rdr.read_to_end(&mut buf)?;
        }
        let text = std::str::from_utf8(&buf)?;
        Ok(Self::parse(text))
    }

    fn expand(raw: &HashMap<String, String>, name: &str, value: &str, depth: usize) -> String {
        if depth == 0 {
            log::debug!("entity '{name}' exceeds the nesting limit; leaving it unexpanded");
            return value.to_string();
        }
        REFERENCE_PATTERN
            .replace_all(value, |caps: &Captures| {
                let inner = &caps[1];
                match raw.get(inner) {
                    Some(inner_value) if inner != name => {
                        Self::expand(raw, inner, inner_value, depth - 1)
                    }
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// 名前に対応する置換文字列を取得します。
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// 登録されているエンティティの数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// テーブルが空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(名前, 置換文字列)` のイテレータを返します。順序は不定です。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// テキスト中のエンティティ参照を展開します。
    ///
    /// `&name;` はテーブルに値があれば置き換え、なければそのまま残します。
    /// その後、`&#xHHHH;` と `&#DDDD;` 形式の数値文字参照のうち
    /// [`PRINTABLE_THRESHOLD`] 以上のものを対応する文字に置き換えます。
    ///
    /// # 例
    ///
    /// ```
    /// use vortaro::entity::EntityTable;
    ///
    /// let table = EntityTable::parse(r#"<!ENTITY Ccirc "&#x0108;">"#);
    /// assert_eq!(table.resolve("&Ccirc;u"), "Ĉu");
    /// assert_eq!(table.resolve("&nekonata;"), "&nekonata;");
    /// assert_eq!(table.resolve("&#x1;"), "&#x1;");
    /// ```
    pub fn resolve<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains('&') {
            return Cow::Borrowed(text);
        }
        let named = REFERENCE_PATTERN.replace_all(text, |caps: &Captures| {
            self.entries
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        });
        if !NUMERIC_PATTERN.is_match(&named) {
            return named;
        }
        let decoded = NUMERIC_PATTERN
            .replace_all(&named, decode_numeric_reference)
            .into_owned();
        Cow::Owned(decoded)
    }
}

fn decode_numeric_reference(caps: &Captures) -> String {
    let code_point = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
        (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
        (None, None) => None,
    };
    code_point
        .filter(|&cp| cp >= PRINTABLE_THRESHOLD)
        .and_then(char::from_u32)
        .map_or_else(|| caps[0].to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DTD: &str = r#"
<!ENTITY Ccirc "&#x0108;">
<!ENTITY ccirc "&#x0109;">
<!ENTITY gxis "&#x011d;is">
<!ENTITY FZ "Fundamento de Esperanto">
<!ENTITY FZa "&FZ;, A">
<!ENTITY memo "&memo; ripetita">
<!ENTITY manko "&ne_ekzistas;">
"#;

    #[test]
    fn test_parse_declarations() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.len(), 7);
        assert_eq!(table.get("FZ"), Some("Fundamento de Esperanto"));
        assert_eq!(table.get("Ccirc"), Some("&#x0108;"));
    }

    #[test]
    fn test_nested_entities() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.get("FZa"), Some("Fundamento de Esperanto, A"));
    }

    #[test]
    fn test_self_reference_left_literal() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.get("memo"), Some("&memo; ripetita"));
    }

    #[test]
    fn test_missing_nested_reference_left_literal() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.get("manko"), Some("&ne_ekzistas;"));
    }

    #[test]
    fn test_cycle_terminates() {
        let table = EntityTable::parse(r#"<!ENTITY a "x&b;"> <!ENTITY b "y&a;">"#);
        let a = table.get("a").unwrap();
        assert!(a.starts_with("xyxy"));
    }

    #[test]
    fn test_later_declaration_wins() {
        let table = EntityTable::parse(r#"<!ENTITY a "unua"> <!ENTITY a "dua">"#);
        assert_eq!(table.get("a"), Some("dua"));
    }

    #[test]
    fn test_resolve() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.resolve("&Ccirc;evalo"), "Ĉevalo");
        assert_eq!(table.resolve("&gxis; revido"), "ĝis revido");
        assert_eq!(table.resolve("vidu &FZ;"), "vidu Fundamento de Esperanto");
    }

    #[test]
    fn test_resolve_unknown_reference() {
        let table = EntityTable::parse(DTD);
        assert_eq!(table.resolve("a &nekonata; b"), "a &nekonata; b");
    }

    #[test]
    fn test_resolve_numeric_references() {
        let table = EntityTable::default();
        assert_eq!(table.resolve("&#x0109;u"), "ĉu");
        assert_eq!(table.resolve("&#265;u"), "ĉu");
        assert_eq!(table.resolve("a&#x9;b"), "a&#x9;b");
        assert_eq!(table.resolve("a&#10;b"), "a&#10;b");
    }

    #[test]
    fn test_resolve_without_references_borrows() {
        let table = EntityTable::parse(DTD);
        assert!(matches!(table.resolve("domo"), Cow::Borrowed("domo")));
    }

    #[test]
    fn test_from_readers_concatenates() {
        let first = r#"<!ENTITY a "A">"#;
        let second = r#"<!ENTITY b "&a;B">"#;
        let table = EntityTable::from_readers([first.as_bytes(), second.as_bytes()]).unwrap();
        assert_eq!(table.get("b"), Some("AB"));
    }

    #[test]
    fn test_from_reader_invalid_utf8() {
        let data: &[u8] = &[0x3c, 0x21, 0xff, 0xfe];
        assert!(EntityTable::from_reader(data).is_err());
    }
}
