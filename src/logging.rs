use tracing_subscriber::EnvFilter;

/// ログ初期化
///
/// 通常は `warn` 以上のみ。`--verbose` で `debug` になり、
/// そのときだけ `RUST_LOG` での上書きを許可する。
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
