//! 単一記事の変換モジュール
//!
//! 1つの記事ソースを変換し、生成されたエントリのマークアップを標準出力に書き出します。
//! 記事の見た目を辞書全体を構築せずに確認するために使います。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use vortaro::Converter;
use vortaro::errors::VortaroError;

use clap::Parser;

use crate::entities::load_entities;

/// 記事コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "article",
    about = "A program to convert a single article and print its entries."
)]
pub struct Args {
    /// Article source file (*.xml).
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// Entity definition file (*.dtd). Can be specified multiple times.
    #[clap(short = 'e', long = "entities-in", required = true)]
    entities_in: Vec<PathBuf>,

    /// Language of the translations shown under each headword.
    #[clap(short = 'L', long, default_value = "en")]
    language: String,
}

/// 記事の変換中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 記事の変換エラー
    #[error("Converting the article failed: {0}")]
    Vortaro(#[from] VortaroError),
}

/// 記事を変換し、エントリを書き出します。
///
/// # 戻り値
///
/// 書き出したエントリの数
fn write_article<W>(converter: &Converter, args: &Args, mut wtr: W) -> Result<usize, ArticleError>
where
    W: Write,
{
    let entries = converter.convert_reader(File::open(&args.input)?)?;
    for entry in &entries {
        entry.write(&mut wtr)?;
    }
    wtr.flush()?;
    Ok(entries.len())
}

/// 記事コマンドを実行する
///
/// # エラー
///
/// ファイルの読み込みや記事の変換に失敗した場合、`ArticleError`を返します。
pub fn run(args: Args) -> Result<(), ArticleError> {
    eprintln!("Loading entity definitions...");
    let converter = Converter::new(load_entities(&args.entities_in)?)
        .primary_language(args.language.as_str())?;

    eprintln!("Converting {}...", args.input.display());
    let out = BufWriter::new(io::stdout().lock());
    let num_entries = write_article(&converter, &args, out)?;
    eprintln!("{num_entries} entries");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const ARTICLE: &str = r#"<?xml version="1.0"?>
<vortaro><art><kap><rad>hund</rad></kap>
<drv mrk="hund.0o"><kap><tld/>o</kap><snc><dif>Besto.</dif></snc><trd lng="en">dog</trd></drv>
</art></vortaro>"#;

    #[test]
    fn test_write_article() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hund.xml");
        fs::write(&input, ARTICLE).unwrap();

        let args = Args {
            input,
            entities_in: vec![],
            language: "en".to_string(),
        };
        let converter = Converter::new(vortaro::EntityTable::default());
        let mut buf = vec![];
        let num_entries = write_article(&converter, &args, &mut buf).unwrap();
        assert_eq!(num_entries, 1);

        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("<d:entry id=\"hund.0o\" d:title=\"hundo\">"));
        assert!(out.contains("<d:index d:value=\"hundojn\" />"));
        assert!(out.contains("<p class=\"translations\">dog</p>"));
    }

    #[test]
    fn test_write_article_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input: dir.path().join("missing.xml"),
            entities_in: vec![],
            language: "en".to_string(),
        };
        let converter = Converter::new(vortaro::EntityTable::default());
        let result = write_article(&converter, &args, vec![]);
        assert!(matches!(result, Err(ArticleError::Io(_))));
    }
}
