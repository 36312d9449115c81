//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-lib`: 运行 toggle-anim 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `curve-table`: 打印速度曲线采样表

use std::process::ExitCode;

use toggle_anim::SpeedCurve;
use xshell::{Shell, cmd};

fn run(sh: &Shell, step: &str, args: &[&str]) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    cmd!(sh, "cargo {args...}").run()?;
    Ok(())
}

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    match cmd!(sh, "cargo llvm-cov --version").quiet().ignore_stdout().run() {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());
    let sh = Shell::new()?;

    match sub.as_str() {
        "check-all" => {
            run(&sh, "cargo fmt --all -- --check", &["fmt", "--all", "--", "--check"])?;
            run(
                &sh,
                "cargo clippy --workspace --all-targets",
                &["clippy", "--workspace", "--all-targets"],
            )?;
            run(&sh, "cargo test --workspace", &["test", "--workspace"])?;
        }
        "cov-lib" => {
            ensure_cargo_llvm_cov_available(&sh)?;
            run(
                &sh,
                "cargo llvm-cov -p toggle-anim --all-features --html",
                &["llvm-cov", "-p", "toggle-anim", "--all-features", "--html"],
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available(&sh)?;

            // 排除 xtask，只统计库与预览工具
            run(
                &sh,
                "cargo llvm-cov --workspace --exclude xtask --all-features --html",
                &[
                    "llvm-cov",
                    "--workspace",
                    "--exclude",
                    "xtask",
                    "--all-features",
                    "--html",
                ],
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "curve-table" => {
            let steps = match args.next() {
                Some(s) => s
                    .parse::<usize>()
                    .map_err(|e| anyhow::anyhow!("无效的 steps '{s}': {e}"))?,
                None => 10,
            };
            println!("{}", SpeedCurve::sample_table(steps));
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-lib         运行 toggle-anim 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  curve-table     打印速度曲线采样表

CURVE-TABLE:
  cargo xtask curve-table [steps]

  steps 为 0.0 - 1.0 的区间划分数，默认 10

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-lib       -> cargo xtask cov-lib
  cargo cov-workspace -> cargo xtask cov-workspace
"#
    );
}
