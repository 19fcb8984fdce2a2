use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use ward_round::{annotate, cli, config, error, logging, report, spinner, summarizer, surface, transport};
use ward_round_common::{render, AnnotationLayer, Shape};

use cli::{Cli, Commands};
use config::Config;
use error::WardRoundError;
use spinner::SpinnerTrigger;
use summarizer::Summarizer;
use surface::PixmapSurface;
use transport::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Draw { shape, size, output } => {
            let size = match size {
                Some(size) => size,
                None => config.canvas_size()?,
            };
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.png", shape)));
            draw_to(shape, size, &output)?;
            println!("✔ {} を描画: {}", shape.label(), output.display());
        }

        Commands::Redraw { size, out_dir } => {
            let size = match size {
                Some(size) => size,
                None => config.canvas_size()?,
            };
            for shape in Shape::ALL {
                let output = out_dir.join(format!("{}.png", shape));
                draw_to(shape, size, &output)?;
                println!("✔ {} を描画: {}", shape.label(), output.display());
            }
        }

        Commands::Annotate { shape, events, size, output } => {
            let size = match size {
                Some(size) => size,
                None => config.canvas_size()?,
            };
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}-annotated.png", shape)));
            let events = annotate::load_events(&events)
                .with_context(|| format!("イベントを読み込めません: {}", events.display()))?;

            let mut surface = PixmapSurface::square(size);
            let mut layer = AnnotationLayer::attach(&mut surface, shape, size, size);
            let stats = annotate::replay(&mut layer, &mut surface, &events);
            surface.save_png(&output)?;

            println!(
                "✔ {}イベント / {}ストローク / {}線分を書き込み: {}",
                stats.events,
                stats.strokes,
                stats.segments,
                output.display()
            );
        }

        Commands::Summarize { notes, file, protocol } => {
            let notes = read_notes(notes, file.as_deref())?;

            let mut config = config;
            if let Some(protocol) = protocol {
                config.protocol = protocol.into();
            }

            let client = Summarizer::new(
                config.summarizer_config()?,
                ReqwestTransport::new(config.timeout())?,
            );

            println!("{}", report::documented_on(&chrono::Local::now()));
            let trigger = SpinnerTrigger::new();
            let outcome = client.summarize_with_trigger(&notes, &trigger).await;
            println!("{}", report::render_outcome(&outcome));

            if outcome.is_err() {
                std::process::exit(1);
            }
        }

        Commands::Config { set_api_key, set_endpoint, protocol, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ APIキーを設定しました");
            }

            if let Some(endpoint) = set_endpoint {
                config.endpoint = endpoint;
                changed = true;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(protocol) = protocol {
                config.protocol = protocol.into();
                changed = true;
                println!("✔ プロトコルを {} に設定しました", config.protocol.as_str());
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  プロトコル: {}", config.protocol.as_str());
                println!("  エンドポイント: {}", config.endpoint);
                println!("  モデル: {}", config.model);
                println!("  最大試行回数: {}", config.max_attempts);
                println!("  初回待機: {}ms", config.base_delay_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  最小文字数: {}", config.min_note_chars);
                println!("  キャンバス: {}px", config.canvas_size);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn draw_to(shape: Shape, size: u32, output: &Path) -> error::Result<()> {
    debug!(shape = shape.as_str(), size, "解剖図を描画");
    let mut surface = PixmapSurface::square(size);
    render(&mut surface, shape, size, size);
    surface.save_png(output)
}

fn read_notes(notes: Option<String>, file: Option<&Path>) -> error::Result<String> {
    match (notes, file) {
        (Some(notes), _) => Ok(notes),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(WardRoundError::MissingNotes),
    }
}
