//! 語尾に基づく屈折形の生成
//!
//! 見出し語の最後の文字から品詞クラスを判定し、検索索引に登録する屈折形を生成します。
//! 規則は固定の小さな表で、例外や不規則形は扱いません。

/// 語尾から判定される品詞クラス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// `-o`（名詞）または `-a`（形容詞）。複数形と対格を持つ。
    Nominal,
    /// `-e`（派生副詞）。対格のみを持つ。
    Adverb,
    /// `-i`（動詞不定形）。時制と法の語尾を持つ。
    Verb,
    /// 上記以外。変化しない。
    Invariant,
}

const NOMINAL_SUFFIXES: [&str; 3] = ["j", "n", "jn"];
const VERB_SUFFIXES: [&str; 5] = ["as", "is", "os", "u", "us"];

impl WordClass {
    /// 単語の最後の文字から品詞クラスを判定します。
    pub fn of(word: &str) -> Self {
        match word.chars().next_back() {
            Some('o' | 'a') => Self::Nominal,
            Some('e') => Self::Adverb,
            Some('i') => Self::Verb,
            _ => Self::Invariant,
        }
    }
}

/// 単語のすべての索引形を生成します。先頭は常に単語そのものです。
///
/// # 例
///
/// ```
/// use vortaro::inflection::inflect;
///
/// assert_eq!(inflect("domo"), ["domo", "domoj", "domon", "domojn"]);
/// assert_eq!(inflect("bele"), ["bele", "belen"]);
/// assert_eq!(inflect("iri"), ["iri", "iras", "iris", "iros", "iru", "irus"]);
/// assert_eq!(inflect("kaj"), ["kaj"]);
/// ```
pub fn inflect(word: &str) -> Vec<String> {
    match WordClass::of(word) {
        WordClass::Nominal => std::iter::once(word.to_string())
            .chain(NOMINAL_SUFFIXES.iter().map(|suffix| format!("{word}{suffix}")))
            .collect(),
        WordClass::Adverb => vec![word.to_string(), format!("{word}n")],
        WordClass::Verb => {
            // 'i' is one byte
            let root = &word[..word.len() - 1];
            std::iter::once(word.to_string())
                .chain(VERB_SUFFIXES.iter().map(|suffix| format!("{root}{suffix}")))
                .collect()
        }
        WordClass::Invariant => vec![word.to_string()],
    }
}
