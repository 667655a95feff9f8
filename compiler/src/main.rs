//! Vortaro 辞書コンパイラのメインエントリーポイント
//!
//! このモジュールは、記事ソースから辞書文書を構築するための各サブコマンドを提供します。
//! ディレクトリ全体からの辞書文書の構築、単一記事の変換結果の確認、
//! エンティティ表の確認など、辞書構築に関する操作を統合したCLIツールです。

mod article;
mod build;
mod entities;

use clap::Parser;
use thiserror::Error;

use crate::{article::ArticleError, build::BuildError, entities::EntitiesError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// ソースディレクトリから辞書文書を構築します
    ///
    /// ディレクトリ内のすべての記事を変換し、1つの辞書文書として出力します。
    Build(build::Args),

    /// 1つの記事を変換し、エントリを標準出力に書き出します
    Article(article::Args),

    /// エンティティ定義を読み込み、展開後の表を標準出力に書き出します
    Entities(entities::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書文書の構築中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 記事の変換中のエラー
    #[error(transparent)]
    ArticleError(#[from] ArticleError),
    /// エンティティ表の読み込み中のエラー
    #[error(transparent)]
    EntitiesError(#[from] EntitiesError),
}

/// メイン関数
///
/// ロガーを初期化し、コマンドライン引数をパースして指定されたサブコマンドを実行します。
/// ログレベルは `RUST_LOG` で指定でき、既定は `info` です。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Article(args) => Ok(article::run(args)?),
        Command::Entities(args) => Ok(entities::run(args)?),
    }
}
