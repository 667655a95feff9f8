//! 辞書文書のビルドモジュール
//!
//! このモジュールは、ソースディレクトリ内の記事ファイル(*.xml)とエンティティ定義ファイルから
//! 1つの辞書文書を構築する機能を提供します。
//! 読み込みや変換に失敗した記事は警告を出して読み飛ばし、残りの記事の変換を続けます。

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use vortaro::errors::VortaroError;
use vortaro::{Converter, DictionaryEntry, DocumentWriter};

use clap::Parser;
use walkdir::WalkDir;

use crate::entities::load_entities;

/// ビルドコマンドの引数
///
/// 辞書文書を構築するために必要な入力ファイルと出力先を指定します。
#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to build the dictionary document."
)]
pub struct Args {
    /// Directory containing the article sources (*.xml).
    #[clap(short = 's', long)]
    src_dir: PathBuf,

    /// Entity definition file (*.dtd). Can be specified multiple times.
    #[clap(short = 'e', long = "entities-in", required = true)]
    entities_in: Vec<PathBuf>,

    /// File to which the dictionary document is output.
    #[clap(short = 'o', long)]
    dict_out: PathBuf,

    /// Language of the translations shown under each headword.
    #[clap(short = 'L', long, default_value = "en")]
    language: String,

    /// Maximum depth of nested headword variants.
    #[clap(long, default_value_t = 16)]
    max_depth: usize,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// ソースディレクトリの走査エラー
    #[error("Scanning the source directory failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// 変換器の構築エラー
    #[error("Dictionary building failed: {0}")]
    Vortaro(#[from] VortaroError),
}

/// ビルド結果の集計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// 変換に成功したファイルの数
    pub num_converted: usize,
    /// 読み飛ばしたファイルの数
    pub num_failed: usize,
    /// 書き出したエントリの数
    pub num_entries: usize,
}

/// ソースディレクトリ直下の記事ファイルをファイル名順に列挙します。
///
/// サブディレクトリは走査しません。
///
/// # エラー
///
/// ディレクトリを読めない場合、`walkdir::Error`を返します。
pub fn collect_sources(src_dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut sources = vec![];
    for entry in WalkDir::new(src_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_xml = entry.path().extension().is_some_and(|ext| ext == "xml");
        if entry.file_type().is_file() && is_xml {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

fn convert_file(converter: &Converter, path: &Path) -> Result<Vec<DictionaryEntry>, VortaroError> {
    converter.convert_reader(File::open(path)?)
}

/// 記事ファイルを順に変換し、1つの辞書文書として書き出します。
///
/// CLIに依存しないコアのビルドロジックです。
///
/// # 引数
///
/// * `converter` - 変換器
/// * `sources` - 記事ファイルのパス
/// * `wtr` - 辞書文書の書き出し先
///
/// # エラー
///
/// 書き出しに失敗した場合、`BuildError`を返します。
/// 個々の記事の読み込みや変換の失敗はエラーにせず、集計に含めます。
pub fn build_document<W>(
    converter: &Converter,
    sources: &[PathBuf],
    wtr: W,
) -> Result<BuildSummary, BuildError>
where
    W: Write,
{
    let mut wtr = DocumentWriter::new(wtr)?;
    let mut summary = BuildSummary::default();

    for path in sources {
        match convert_file(converter, path) {
            Ok(entries) => {
                for entry in &entries {
                    wtr.push(entry)?;
                }
                summary.num_converted += 1;
            }
            Err(e) => {
                log::warn!("{}: {e}; skipping", path.display());
                summary.num_failed += 1;
            }
        }
    }

    summary.num_entries = wtr.num_entries();
    wtr.finish()?;
    Ok(summary)
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// エンティティ定義の読み込み、ソースディレクトリの走査、または辞書文書の書き出しに
/// 失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    println!("Loading entity definitions...");
    let converter = Converter::new(load_entities(&args.entities_in)?)
        .primary_language(args.language.as_str())?
        .max_nesting_depth(args.max_depth)?;

    let sources = collect_sources(&args.src_dir)?;
    println!("Converting {} articles...", sources.len());

    let file = File::create(&args.dict_out)?;
    let summary = build_document(&converter, &sources, file)?;

    println!(
        "Successfully built the dictionary to {}",
        args.dict_out.display()
    );
    println!(
        "{} files converted, {} files failed, {} entries written",
        summary.num_converted, summary.num_failed, summary.num_entries
    );
    Ok(())
}
