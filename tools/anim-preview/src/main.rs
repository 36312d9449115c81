//! # Anim Preview
//!
//! 动画预览工具 - 加载 JSON 动画预设，用手动时钟逐帧模拟并输出动画值。
//!
//! ## 用法
//!
//! ```bash
//! # 模拟单个预设文件（每帧 16ms）
//! cargo run -p anim-preview -- run presets/menu.json
//!
//! # 模拟目录下所有 .json 预设，在 150ms 时松开开关，输出 JSON 行
//! cargo run -p anim-preview -- run presets --toggle-at 150 --json
//!
//! # 只模拟指定名称的预设
//! cargo run -p anim-preview -- run presets --preset button_width
//!
//! # 打印速度曲线采样表
//! cargo run -p anim-preview -- curves --steps 20
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use toggle_anim::{
    AnimationPreset, DynAnimation, ManualClock, NumericValue, PresetFile, SpeedCurve,
};
use tracing::{Level, debug, info};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "anim-preview")]
#[command(about = "动画预览工具 - 逐帧模拟 JSON 动画预设")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 模拟预设
    Run {
        /// 预设文件或目录
        path: PathBuf,

        /// 帧间隔（毫秒）（默认：16）
        #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..))]
        frame_ms: u64,

        /// 在该时刻（毫秒）松开开关，开始回落
        #[arg(long)]
        toggle_at: Option<u64>,

        /// 只模拟指定名称的预设
        #[arg(long)]
        preset: Option<String>,

        /// 以 JSON 行输出
        #[arg(long)]
        json: bool,
    },

    /// 打印速度曲线采样表
    Curves {
        /// 区间划分数（默认：10）
        #[arg(long, default_value = "10")]
        steps: usize,
    },
}

/// 模拟输出的一帧
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Frame {
    /// 预设名称
    preset: String,
    /// 模拟时刻（毫秒）
    t_ms: u64,
    /// 当前开关状态
    triggered: bool,
    /// 动画值
    value: NumericValue,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            path,
            frame_ms,
            toggle_at,
            preset,
            json,
        } => run(&path, frame_ms, toggle_at, preset.as_deref(), json),
        Commands::Curves { steps } => {
            println!("{}", SpeedCurve::sample_table(steps));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ 预览失败: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 执行 run 子命令
fn run(
    path: &Path,
    frame_ms: u64,
    toggle_at: Option<u64>,
    only: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let files = collect_preset_files(path)?;
    if files.is_empty() {
        anyhow::bail!("未找到预设文件（.json）: {}", path.display());
    }

    let mut simulated = 0;
    for file in &files {
        let presets = load_preset_file(file)?;
        info!(file = %file.display(), count = presets.presets.len(), "加载预设");

        for preset in &presets.presets {
            if only.is_some_and(|name| name != preset.name) {
                continue;
            }

            simulate(preset, frame_ms, toggle_at, |frame| print_frame(&frame, json))
                .with_context(|| format!("模拟预设 '{}' 失败", preset.name))?;
            simulated += 1;
        }
    }

    if simulated == 0 {
        anyhow::bail!("没有可模拟的预设");
    }
    Ok(())
}

/// 收集路径下的所有预设文件
fn collect_preset_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("路径不存在: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        let p = entry.path();
        if p.is_file() && p.extension().is_some_and(|ext| ext == "json") {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// 读取并校验单个预设文件
fn load_preset_file(file: &Path) -> anyhow::Result<PresetFile> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("无法读取文件: {}", file.display()))?;
    PresetFile::from_json(&text).with_context(|| format!("无效的预设文件: {}", file.display()))
}

/// 单个预设最多模拟的帧数
const MAX_FRAMES: u64 = 100_000;

/// 用手动时钟逐帧模拟一个预设，每产生一帧就交给 `emit`
///
/// 从 0ms 开始按 `frame_ms` 推进；给定 `toggle_at` 时在该时刻翻转为回落，
/// 直到最后一轮运行结束。返回模拟的帧数。
fn simulate(
    preset: &AnimationPreset,
    frame_ms: u64,
    toggle_at: Option<u64>,
    mut emit: impl FnMut(Frame) -> anyhow::Result<()>,
) -> anyhow::Result<u64> {
    preset.validate()?;

    let duration = preset.duration_ms.unsigned_abs();
    let end_ms = match toggle_at {
        Some(at) => at.checked_add(duration).with_context(|| {
            format!("翻转时刻 {at}ms 加上时长 {duration}ms 超出范围")
        })?,
        None => duration,
    };
    let step = frame_ms.max(1);

    // 按步长的帧数，加上翻转帧与结束帧
    let expected = (end_ms / step).saturating_add(3);
    if expected > MAX_FRAMES {
        anyhow::bail!(
            "预设 '{}' 需要约 {expected} 帧，超过上限 {MAX_FRAMES}，请增大 --frame-ms",
            preset.name
        );
    }

    let clock = ManualClock::new();
    let mut animation = DynAnimation::with_clock(clock.clone());

    let mut count = 0;
    let mut t_ms = 0;
    loop {
        clock.set(t_ms);
        let triggered = toggle_at.is_none_or(|at| t_ms < at);
        let value = preset.sample(&mut animation, triggered)?;
        emit(Frame {
            preset: preset.name.clone(),
            t_ms,
            triggered,
            value,
        })?;
        count += 1;

        if t_ms >= end_ms {
            break;
        }
        // 翻转时刻与结束时刻都要落在帧上
        let mut next = t_ms.saturating_add(step).min(end_ms);
        if let Some(at) = toggle_at
            && t_ms < at
        {
            next = next.min(at);
        }
        t_ms = next;
    }

    debug!(preset = %preset.name, frames = count, "模拟完成");
    Ok(count)
}

/// 输出一帧
fn print_frame(frame: &Frame, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(frame)?);
    } else {
        let arrow = if frame.triggered { "→" } else { "←" };
        println!(
            "{:<16} {:>6}ms {} {}",
            frame.preset, frame.t_ms, arrow, frame.value
        );
    }
    Ok(())
}
