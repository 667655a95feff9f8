//! 変換の設定

/// 変換の設定
///
/// [`Converter`](crate::Converter) のビルダーメソッドを通じて変更します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// 見出しの直後に表示する訳語の言語コード
    pub(crate) primary_language: String,

    /// 入れ子になった見出し語の異形をたどる最大の深さ
    pub(crate) max_nesting_depth: usize,
}

/// 既定の訳語言語
pub const DEFAULT_PRIMARY_LANGUAGE: &str = "en";

/// 既定の異形の最大深さ
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 16;

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            primary_language: DEFAULT_PRIMARY_LANGUAGE.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ConvertConfig {
    #[inline]
    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    #[inline]
    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }
}
