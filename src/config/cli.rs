use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "saju-oracle")]
#[command(about = "Deterministic saju facts, tojeong codes and response contracts")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 計算土亭秘訣卦號
    Tojeong {
        #[arg(long, help = "Birth date as YYYY-MM-DD")]
        birth_date: String,

        #[arg(long, help = "Target year (defaults to the current year)")]
        target_year: Option<i32>,
    },

    /// 從命盤 JSON 萃取 grounding
    Grounding {
        #[arg(long)]
        input: PathBuf,
    },

    /// 一般解讀：以回應檔模擬生成式服務的輸出
    Interpret {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, help = "Raw provider output; omitted means an empty response")]
        response: Option<PathBuf>,
    },

    /// 進階解讀，需要付款或推薦額度
    Premium {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        response: Option<PathBuf>,

        #[arg(long)]
        latest_payment_at: Option<String>,

        #[arg(long, default_value = "0")]
        credits: String,
    },

    /// 由付款時間與額度推導權限
    Entitlement {
        #[arg(long)]
        latest_payment_at: Option<String>,

        #[arg(long, default_value = "0")]
        credits: String,
    },

    /// 驗證付款確認請求
    VerifyPayment {
        #[arg(long, help = "Request body as JSON")]
        payload: String,
    },
}
