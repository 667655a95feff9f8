//! 出力マークアップ用の文字列処理

/// テキストを出力マークアップに埋め込める形にエスケープします。
///
/// `<` と `>` をエスケープし、`&` は `&name;` 形式の参照の先頭でない場合のみ
/// `&amp;` に置き換えます。既にエスケープ済みのテキストは変化しません。
///
/// 属性値の照合に使う文字列には適用しないでください。
///
/// # 例
///
/// ```
/// use vortaro::markup::sanitize;
///
/// assert_eq!(sanitize("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(sanitize("&lt;b&gt;"), "&lt;b&gt;");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' if starts_reference(&text[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// `rest` が `name;` で始まるかどうか
fn starts_reference(rest: &str) -> bool {
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    name_len > 0 && rest.as_bytes().get(name_len) == Some(&b';')
}

/// 見出し語を `d:title` 属性に入れられる形にします。
///
/// 二重引用符を単一引用符に置き換えるだけで、完全なエスケープは行いません。
pub fn title_text(word: &str) -> String {
    word.replace('"', "'")
}

/// 二重引用符を `&quot;` に置き換えます。
pub fn escape_quotes(word: &str) -> String {
    word.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_brackets() {
        assert_eq!(sanitize("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn test_sanitize_ampersand() {
        assert_eq!(sanitize("A & B"), "A &amp; B");
        assert_eq!(sanitize("A&B"), "A&amp;B");
        assert_eq!(sanitize("&amp;"), "&amp;");
        assert_eq!(sanitize("&nekonata;"), "&nekonata;");
        assert_eq!(sanitize("&#x1;"), "&amp;#x1;");
        assert_eq!(sanitize("&;"), "&amp;;");
        assert_eq!(sanitize("fino &"), "fino &amp;");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        assert_eq!(sanitize("ĉu ĝi?"), "ĉu ĝi?");
        assert_eq!(sanitize("&ĉ;"), "&amp;ĉ;");
    }

    #[test]
    fn test_sanitize_idempotent_on_clean_text() {
        let once = sanitize("a < b && c > d");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_title_text() {
        assert_eq!(title_text(r#"la "vorto""#), "la 'vorto'");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes(r#"a"b"#), "a&quot;b");
    }
}
