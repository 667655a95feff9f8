//! エンティティ表の確認モジュール
//!
//! エンティティ定義ファイルを読み込み、展開後の表を名前順に出力します。
//! 他のサブコマンドが使うエンティティ表の読み込みもこのモジュールが担います。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use vortaro::EntityTable;
use vortaro::errors::VortaroError;

use clap::Parser;

/// エンティティコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "entities",
    about = "A program to print the resolved entity table."
)]
pub struct Args {
    /// Entity definition file (*.dtd). Can be specified multiple times.
    #[clap(short = 'e', long = "entities-in", required = true)]
    entities_in: Vec<PathBuf>,
}

/// エンティティ表の読み込み中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum EntitiesError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// エンティティ定義の読み込みエラー
    #[error("Loading entities failed: {0}")]
    Vortaro(#[from] VortaroError),
}

/// エンティティ定義ファイルを指定順に読み込み、1つの表を構築します。
///
/// # 引数
///
/// * `paths` - エンティティ定義ファイルのパス
///
/// # エラー
///
/// ファイルを開けない場合、または内容がUTF-8として不正な場合にエラーを返します。
pub fn load_entities(paths: &[PathBuf]) -> Result<EntityTable, VortaroError> {
    let rdrs = paths
        .iter()
        .map(File::open)
        .collect::<io::Result<Vec<_>>>()?;
    EntityTable::from_readers(rdrs)
}

/// 表を `名前<TAB>値` の行として名前順に書き出します。
fn write_table<W>(table: &EntityTable, mut wtr: W) -> io::Result<()>
where
    W: Write,
{
    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_unstable();
    for (name, value) in rows {
        writeln!(wtr, "{name}\t{value}")?;
    }
    wtr.flush()
}

/// エンティティコマンドを実行する
///
/// # エラー
///
/// ファイルの読み込みや書き出しに失敗した場合、`EntitiesError`を返します。
pub fn run(args: Args) -> Result<(), EntitiesError> {
    eprintln!("Loading entity definitions...");
    let table = load_entities(&args.entities_in)?;
    eprintln!("{} entities loaded", table.len());

    let out = BufWriter::new(io::stdout().lock());
    write_table(&table, out)?;
    Ok(())
}
