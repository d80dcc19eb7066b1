/// 推定器ベンチマーク結果の集計ツール
///
/// 使い方:
///   # 既定のパス（mvec-stats/report2 → docs/statistics）
///   extract_stats
///
///   # 動的シーンのみ、別の出力先へ
///   extract_stats --root runs/report3 --filter dyn --out-dir out/
///
///   # 設定ファイル + JSON出力
///   extract_stats --config stats.toml --json
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mvec_stats::report::format_value;
use mvec_stats::{run, StatsConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "推定器の結果CSVを集計してデコーダ別の表を出力する")]
struct Cli {
    /// 設定ファイル（TOML）。コマンドライン引数が優先される
    #[arg(long)]
    config: Option<PathBuf>,

    /// `<decoder>_<clip>` ディレクトリを含むルート
    #[arg(long)]
    root: Option<PathBuf>,

    /// サブディレクトリ名に含まれるべき文字列
    #[arg(long)]
    filter: Option<String>,

    /// 出力ディレクトリ
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// 実行結果をJSONで標準出力へ
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<StatsConfig> {
        let mut config = match &self.config {
            Some(path) => StatsConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => StatsConfig::default(),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(filter) = &self.filter {
            config.filter = filter.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    log::debug!("config: {config:?}");

    let report = run(&config)
        .with_context(|| format!("failed to aggregate results under {}", config.root.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("wrote {} files to {}", report.written.len(), config.out_dir.display());
    for row in &report.summary.rows {
        let cells: Vec<String> = report
            .summary
            .estimators
            .iter()
            .zip(&row.cells)
            .map(|(est, cell)| format!("{est}={}", cell.map(format_value).unwrap_or_else(|| "-".into())))
            .collect();
        println!("  {:10} {}", row.decoder.as_str(), cells.join(" "));
    }
    Ok(())
}
