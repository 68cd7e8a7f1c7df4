// ==========================================
// 炉温排程编辑器 - 命令行入口
// ==========================================
// 用法:
//   furnace-schedule [--db <path>] list
//   furnace-schedule [--db <path>] show <name>
//   furnace-schedule [--db <path>] check <rows.csv>
//   furnace-schedule [--db <path>] save <name> <rows.csv>
//   furnace-schedule [--db <path>] update <name> <rows.csv>
//   furnace-schedule [--db <path>] delete <name>
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;

use furnace_schedule::api::{ApiError, FixedName};
use furnace_schedule::app::{get_default_db_path, AppState};
use furnace_schedule::i18n::{self, t};
use furnace_schedule::importer::{write_rows_csv, CsvRowSource};
use furnace_schedule::logging;

const USAGE: &str = "用法: furnace-schedule [--db <path>] <list|show|check|save|update|delete> [args]";

fn main() -> Result<()> {
    logging::init();
    i18n::init_from_env();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let db_path = match args.iter().position(|a| a == "--db") {
        Some(i) => {
            if i + 1 >= args.len() {
                bail!("--db 缺少路径参数\n{}", USAGE);
            }
            let path = args.remove(i + 1);
            args.remove(i);
            path
        }
        None => get_default_db_path(),
    };

    let command = args.first().map(String::as_str).unwrap_or("");
    let arg = |i: usize| arg_at(&args, i);

    tracing::info!("{} v{}", furnace_schedule::APP_NAME, furnace_schedule::VERSION);
    let state = AppState::new(db_path).map_err(render)?;
    let api = &state.schedule_api;

    match command {
        "list" => {
            for summary in api.list_schedules().map_err(render)? {
                println!(
                    "{}\t{}\t{}",
                    summary.name, summary.cycle_count, summary.updated_at
                );
            }
        }
        "show" => {
            let schedule = api.get_schedule(arg(1)?).map_err(render)?;
            write_rows_csv(&schedule.to_raw_rows(), std::io::stdout())
                .context("写出 CSV 失败")?;
        }
        "check" => {
            let source = read_rows(arg(1)?)?;
            let entries = api.new_session().preview(&source).map_err(render)?;
            println!("{} ({})", t("common.success"), entries.len());
        }
        "save" => {
            let name = arg(1)?;
            let source = read_rows(arg(2)?)?;
            let mut session = api.new_session();
            session
                .save_as(&source, &mut FixedName::new(name))
                .map_err(render)?;
            println!("{}", t("schedule.save_success"));
        }
        "update" => {
            let mut session = api.open_session(arg(1)?).map_err(render)?;
            let source = read_rows(arg(2)?)?;
            session.update(&source).map_err(render)?;
            println!("{}", t("schedule.update_success"));
        }
        "delete" => {
            api.delete_schedule(arg(1)?).map_err(render)?;
            println!("{}", t("schedule.delete_success"));
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

fn arg_at(args: &[String], i: usize) -> Result<&str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("参数不足\n{}", USAGE))
}

fn read_rows(path: &str) -> Result<CsvRowSource> {
    CsvRowSource::from_path(Path::new(path)).with_context(|| format!("读取 {} 失败", path))
}

/// API 错误转为面向用户的消息，技术细节写日志
fn render(err: ApiError) -> anyhow::Error {
    tracing::debug!("{:?}", err);
    anyhow!(err.user_message())
}
