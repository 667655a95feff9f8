//! ソースマークアップのタグ語彙

use std::fmt;

/// ソースマークアップで使用されるタグの種類
///
/// コーパスの固定語彙を列挙し、それ以外のタグは [`Tag::Other`] に格納します。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// パース結果をまとめる合成コンテナ
    Fragment,
    /// 辞書ルート `<vortaro>`
    Vortaro,
    /// 記事 `<art>`
    Art,
    /// 見出し `<kap>`
    Kap,
    /// 語根 `<rad>`
    Rad,
    /// 派生語 `<drv>`
    Drv,
    /// 語義 `<snc>`
    Snc,
    /// 定義 `<dif>`
    Dif,
    /// 用例 `<ekz>`
    Ekz,
    /// 出典 `<fnt>`
    Fnt,
    /// 著者 `<aut>`
    Aut,
    /// 作品 `<vrk>`
    Vrk,
    /// 文献 `<bib>`
    Bib,
    /// 所在 `<lok>`
    Lok,
    /// 訳語 `<trd>`
    Trd,
    /// 訳語グループ `<trdgrp>`
    TrdGrp,
    /// 参照 `<ref>`
    Ref,
    /// 参照グループ `<refgrp>`
    RefGrp,
    /// 注記 `<rim>`
    Rim,
    /// 語根の代替記号 `<tld>`
    Tld,
    /// 異形 `<var>`
    Var,
    /// 公認マーク `<ofc>`
    Ofc,
    /// 語彙外のタグ
    Other(String),
}

impl Tag {
    /// タグ名から種類を判定します。
    pub fn from_name(name: &str) -> Self {
        match name {
            "vortaro" => Self::Vortaro,
            "art" => Self::Art,
            "kap" => Self::Kap,
            "rad" => Self::Rad,
            "drv" => Self::Drv,
            "snc" => Self::Snc,
            "dif" => Self::Dif,
            "ekz" => Self::Ekz,
            "fnt" => Self::Fnt,
            "aut" => Self::Aut,
            "vrk" => Self::Vrk,
            "bib" => Self::Bib,
            "lok" => Self::Lok,
            "trd" => Self::Trd,
            "trdgrp" => Self::TrdGrp,
            "ref" => Self::Ref,
            "refgrp" => Self::RefGrp,
            "rim" => Self::Rim,
            "tld" => Self::Tld,
            "var" => Self::Var,
            "ofc" => Self::Ofc,
            other => Self::Other(other.to_string()),
        }
    }

    /// タグ名を返します。
    pub fn name(&self) -> &str {
        match self {
            Self::Fragment => "#fragment",
            Self::Vortaro => "vortaro",
            Self::Art => "art",
            Self::Kap => "kap",
            Self::Rad => "rad",
            Self::Drv => "drv",
            Self::Snc => "snc",
            Self::Dif => "dif",
            Self::Ekz => "ekz",
            Self::Fnt => "fnt",
            Self::Aut => "aut",
            Self::Vrk => "vrk",
            Self::Bib => "bib",
            Self::Lok => "lok",
            Self::Trd => "trd",
            Self::TrdGrp => "trdgrp",
            Self::Ref => "ref",
            Self::RefGrp => "refgrp",
            Self::Rim => "rim",
            Self::Tld => "tld",
            Self::Var => "var",
            Self::Ofc => "ofc",
            Self::Other(name) => name,
        }
    }

    /// 訳語系のタグ（名前が `trd` で始まるもの）かどうかを返します。
    pub fn is_translation(&self) -> bool {
        match self {
            Self::Trd | Self::TrdGrp => true,
            Self::Other(name) => name.starts_with("trd"),
            _ => false,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
