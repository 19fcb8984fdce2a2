use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use crate::config::MAX_CANVAS_SIZE;
use ward_round_common::{Protocol, Shape};

#[derive(Parser)]
#[command(name = "ward-round")]
#[command(about = "病棟回診記録: 解剖図の描画・書き込みとAIによる臨床ノート要約", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 解剖図を1枚PNGに描画
    Draw {
        /// 形状 (lungs/abdomen/legs)
        #[arg(value_parser = parse_shape)]
        shape: Shape,

        /// 描画サイズ（正方形、px）。省略時は設定値
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIZE as i64))]
        size: Option<u32>,

        /// 出力PNG（デフォルト: <shape>.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 3枚すべての解剖図を描き直す
    Redraw {
        /// 描画サイズ（正方形、px）
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIZE as i64))]
        size: Option<u32>,

        /// 出力ディレクトリ
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// 解剖図に書き込みイベントを再生してPNGに保存
    Annotate {
        /// 形状 (lungs/abdomen/legs)
        #[arg(value_parser = parse_shape)]
        shape: Shape,

        /// ポインタイベントのJSONファイル
        #[arg(short, long)]
        events: PathBuf,

        /// 描画サイズ（正方形、px）
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIZE as i64))]
        size: Option<u32>,

        /// 出力PNG（デフォルト: <shape>-annotated.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 臨床ノートをAIで要約
    Summarize {
        /// ノート本文
        #[arg(short, long, conflicts_with = "file")]
        notes: Option<String>,

        /// ノートファイル（"-" で標準入力）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// エンドポイントの種類を一時的に切り替え
        #[arg(long)]
        protocol: Option<ProtocolArg>,
    },

    /// 設定の表示・変更
    Config {
        /// Gemini APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// エンドポイントURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// エンドポイントの種類を設定
        #[arg(long)]
        protocol: Option<ProtocolArg>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProtocolArg {
    Local,
    Gemini,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Local => Protocol::Local,
            ProtocolArg::Gemini => Protocol::Gemini,
        }
    }
}

fn parse_shape(s: &str) -> Result<Shape, String> {
    s.parse::<Shape>().map_err(|e| e.to_string())
}
