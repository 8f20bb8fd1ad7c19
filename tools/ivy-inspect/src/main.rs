//! Ivy inspection tool
//!
//! Reads raw account data, comment pages, event frames or instruction data
//! (hex on the command line, or `@path` for a binary file), decodes them and
//! prints JSON. Quote
//! commands decode the game and world accounts and run the curve engine on
//! their balances.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ivy_codec::{
    decode_fixed_record, decode_paged_log, instruction_name, layout_by_name,
    CommentIndexAccount, Event, GameAccount, PageLayout, SyncAccount, VaultAccount, WorldAccount,
};
use ivy_config::{load_settings, Settings, TokenSettings};
use ivy_curve::{
    game_quote, ivy_quote, Decimal, GamePool, PoolFees, QuoteResult, SwapCurve, WorldState,
};
use ivy_types::amount;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML); IVY__ environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode account data
    Account {
        #[arg(value_enum)]
        kind: AccountKind,
        /// Account data as hex, or @path
        data: String,
        /// Emit the generic field list instead of the typed view
        #[arg(long)]
        raw: bool,
    },
    /// Decode comment pages in order
    Comments {
        /// One argument per page, hex or @path
        #[arg(required = true)]
        pages: Vec<String>,
        /// Per-page header length, overriding settings
        #[arg(long)]
        header_len: Option<usize>,
    },
    /// Decode a self-CPI event frame
    Event {
        /// Instruction data as hex, or @path
        data: String,
        #[arg(long, default_value = "")]
        signature: String,
        #[arg(long, default_value_t = 0)]
        timestamp: i64,
    },
    /// Name the instruction a transaction's data invokes
    Instruction {
        /// Instruction data as hex, or @path
        data: String,
    },
    /// Quote a swap on a game pool
    QuoteGame {
        /// Game account data, hex or @path
        #[arg(long)]
        game: String,
        /// World account data, hex or @path
        #[arg(long)]
        world: String,
        /// Input amount in human units (IVY when buying, game tokens when selling)
        amount: Decimal,
        #[arg(long)]
        sell: bool,
    },
    /// Quote a swap on the IVY/USDC curve
    QuoteIvy {
        /// World account data, hex or @path
        #[arg(long)]
        world: String,
        /// Input amount in human units (USDC when buying, IVY when selling)
        amount: Decimal,
        #[arg(long)]
        sell: bool,
    },
    /// Print the effective settings as TOML
    Settings,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AccountKind {
    Game,
    World,
    Vault,
    CommentIndex,
    Sync,
}

impl AccountKind {
    fn layout_name(self) -> &'static str {
        match self {
            AccountKind::Game => "Game",
            AccountKind::World => "World",
            AccountKind::Vault => "Vault",
            AccountKind::CommentIndex => "CommentIndex",
            AccountKind::Sync => "Sync",
        }
    }
}

#[derive(Serialize)]
struct QuoteReport {
    quote: Option<QuoteResult>,
    /// Marginal price before the trade
    spot_price: Option<Decimal>,
    /// Curve output without fees, for comparison
    feeless_output: Option<Decimal>,
    /// Quoted output in the output token's smallest unit
    output_amount_raw: Option<u64>,
}

#[derive(Serialize)]
struct InstructionReport {
    discriminator: Option<String>,
    name: Option<&'static str>,
}

/// Which token a quote pays out, for raw conversion
#[derive(Clone, Copy, Debug)]
enum OutputToken {
    Ivy,
    Usdc,
    Game,
}

impl OutputToken {
    fn decimals(self, tokens: &TokenSettings) -> u32 {
        match self {
            OutputToken::Ivy => tokens.ivy_decimals,
            OutputToken::Usdc => tokens.usdc_decimals,
            OutputToken::Game => tokens.game_decimals,
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.global.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if settings.global.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Hex (optionally `0x`-prefixed) or `@path` to a binary file
fn read_input(arg: &str) -> Result<Vec<u8>> {
    if let Some(path) = arg.strip_prefix('@') {
        return read_file(Path::new(path));
    }
    let digits = arg.trim().trim_start_matches("0x");
    hex::decode(digits).with_context(|| format!("invalid hex input ({} chars)", digits.len()))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn decode_account(kind: AccountKind, data: &[u8], raw: bool) -> Result<serde_json::Value> {
    if raw {
        let layout = layout_by_name(kind.layout_name())
            .with_context(|| format!("no layout for {kind:?}"))?;
        return Ok(serde_json::to_value(decode_fixed_record(data, layout)?)?);
    }
    let value = match kind {
        AccountKind::Game => serde_json::to_value(GameAccount::decode(data)?)?,
        AccountKind::World => serde_json::to_value(WorldAccount::decode(data)?)?,
        AccountKind::Vault => serde_json::to_value(VaultAccount::decode(data)?)?,
        AccountKind::CommentIndex => serde_json::to_value(CommentIndexAccount::decode(data)?)?,
        AccountKind::Sync => serde_json::to_value(SyncAccount::decode(data)?)?,
    };
    Ok(value)
}

fn world_state(world: &WorldAccount, settings: &Settings) -> Result<WorldState> {
    WorldState::from_raw(
        world.ivy_curve_sold,
        world.ivy_curve_max,
        world.curve_input_scale_num,
        world.curve_input_scale_den,
        &settings.tokens,
    )
    .context("invalid world account")
}

fn game_pool(game: &GameAccount, settings: &Settings) -> Result<GamePool> {
    GamePool::from_raw(game.ivy_balance, game.game_balance, &settings.tokens)
        .context("invalid game account")
}

fn quote_report(
    curve: &dyn SwapCurve,
    quote: Option<QuoteResult>,
    amount: Decimal,
    is_buy: bool,
    output: OutputToken,
    tokens: &TokenSettings,
) -> Result<QuoteReport> {
    if quote.is_none() {
        warn!(kind = ?curve.kind(), "no quote: insufficient liquidity or supply");
    }
    let output_amount_raw = quote
        .as_ref()
        .map(|quote| amount::to_raw(quote.output_amount, output.decimals(tokens)))
        .transpose()
        .with_context(|| format!("{output:?} output does not fit raw units"))?;
    Ok(QuoteReport {
        quote,
        spot_price: curve.spot_price()?,
        feeless_output: curve.amount_out(amount, is_buy)?,
        output_amount_raw,
    })
}

fn classify_instruction(data: &[u8]) -> InstructionReport {
    let discriminator = data
        .get(..8)
        .map(|tag| format!("0x{}", hex::encode(tag.iter().rev().copied().collect::<Vec<_>>())));
    let name = instruction_name(data);
    debug!(len = data.len(), ?name, "classified instruction data");
    InstructionReport {
        discriminator,
        name,
    }
}

fn run(cli: Cli, settings: &Settings) -> Result<serde_json::Value> {
    let value = match cli.command {
        Command::Account { kind, data, raw } => decode_account(kind, &read_input(&data)?, raw)?,
        Command::Comments { pages, header_len } => {
            let pages = pages
                .iter()
                .map(String::as_str)
                .map(read_input)
                .collect::<Result<Vec<_>>>()?;
            let layout =
                PageLayout::new(header_len.unwrap_or(settings.comments.page_header_len));
            let comments = decode_paged_log(pages.as_slice(), &layout);
            info!(pages = pages.len(), comments = comments.len(), "decoded comment log");
            serde_json::to_value(comments)?
        }
        Command::Event {
            data,
            signature,
            timestamp,
        } => match Event::from_frame(&read_input(&data)?, signature, timestamp)? {
            Some(event) => serde_json::to_value(event)?,
            None => {
                info!("input is not an event frame");
                serde_json::Value::Null
            }
        },
        Command::Instruction { data } => {
            serde_json::to_value(classify_instruction(&read_input(&data)?))?
        }
        Command::QuoteGame {
            game,
            world,
            amount,
            sell,
        } => {
            let game = GameAccount::decode(&read_input(&game)?)?;
            let world_account = WorldAccount::decode(&read_input(&world)?)?;
            let pool = game_pool(&game, settings)?;
            let world = world_state(&world_account, settings)?;
            let fees = PoolFees::new(
                u32::from(world_account.ivy_fee_bps),
                u32::from(world_account.game_fee_bps),
                settings.curve.fee_policy,
            )?;
            debug!(?pool, ?world, ?fees, "quoting game swap");
            let quote = game_quote(&pool, amount, !sell, fees, &world)?;
            let output = if sell { OutputToken::Ivy } else { OutputToken::Game };
            serde_json::to_value(quote_report(
                &pool,
                quote,
                amount,
                !sell,
                output,
                &settings.tokens,
            )?)?
        }
        Command::QuoteIvy {
            world,
            amount,
            sell,
        } => {
            let world = world_state(&WorldAccount::decode(&read_input(&world)?)?, settings)?;
            debug!(?world, "quoting ivy swap");
            let quote = ivy_quote(&world, amount, !sell)?;
            let output = if sell { OutputToken::Usdc } else { OutputToken::Ivy };
            serde_json::to_value(quote_report(
                &world,
                quote,
                amount,
                !sell,
                output,
                &settings.tokens,
            )?)?
        }
        Command::Settings => serde_json::Value::String(settings.to_toml()?),
    };
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(&settings);

    let pretty = cli.pretty;
    let output = run(cli, &settings)?;
    match output {
        serde_json::Value::String(text) => println!("{text}"),
        value if pretty => println!("{}", serde_json::to_string_pretty(&value)?),
        value => println!("{value}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivy_codec::constants::{accounts, instructions};
    use std::str::FromStr;

    fn world_hex(sold: u64, num: u32, den: u32) -> String {
        let mut buf = vec![0u8; 304];
        buf[..8].copy_from_slice(&accounts::WORLD.to_le_bytes());
        buf[240..248].copy_from_slice(&sold.to_le_bytes());
        buf[248..256].copy_from_slice(&1_000_000_000_000_000u64.to_le_bytes());
        buf[288..292].copy_from_slice(&num.to_le_bytes());
        buf[292..296].copy_from_slice(&den.to_le_bytes());
        hex::encode(buf)
    }

    #[test]
    fn test_read_input_hex_and_file() {
        assert_eq!(read_input("0x01ff").unwrap(), vec![1, 255]);
        assert!(read_input("zz").is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.bin");
        std::fs::write(&path, [7u8, 8, 9]).unwrap();
        assert_eq!(
            read_input(&format!("@{}", path.display())).unwrap(),
            vec![7, 8, 9]
        );
    }

    #[test]
    fn test_cli_parses_quote() {
        let cli = Cli::try_parse_from([
            "ivy-inspect",
            "quote-ivy",
            "--world",
            "00",
            "12.5",
            "--sell",
        ])
        .unwrap();
        match cli.command {
            Command::QuoteIvy { amount, sell, .. } => {
                assert_eq!(amount, Decimal::from_str("12.5").unwrap());
                assert!(sell);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quote_ivy_reports_spot_price() {
        let cli = Cli::try_parse_from([
            "ivy-inspect",
            "quote-ivy",
            "--world",
            &world_hex(100_000_000_000, 4, 1),
            "0",
        ])
        .unwrap();
        let value = run(cli, &Settings::default()).unwrap();
        // sqrt(100 * 4)
        assert_eq!(
            Decimal::from_str(value["spot_price"].as_str().unwrap()).unwrap(),
            Decimal::from(20)
        );
        assert_eq!(value["quote"]["price_impact_bps"], 0);
    }

    #[test]
    fn test_quote_ivy_reports_raw_output() {
        let cli = Cli::try_parse_from([
            "ivy-inspect",
            "quote-ivy",
            "--world",
            &world_hex(100_000_000_000, 4, 1),
            "1",
            "--sell",
        ])
        .unwrap();
        let value = run(cli, &Settings::default()).unwrap();
        let output = Decimal::from_str(value["quote"]["output_amount"].as_str().unwrap()).unwrap();
        // selling IVY pays out USDC, six decimals
        assert_eq!(
            value["output_amount_raw"].as_u64().unwrap(),
            amount::to_raw(output, 6).unwrap()
        );
        assert!(value["output_amount_raw"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_instruction_subcommand() {
        let mut data = instructions::GAME_SWAP.to_le_bytes().to_vec();
        data.extend_from_slice(&[0xaa; 24]);
        let cli =
            Cli::try_parse_from(["ivy-inspect", "instruction", &hex::encode(&data)]).unwrap();
        let value = run(cli, &Settings::default()).unwrap();
        assert_eq!(value["name"], "game_swap");
        assert_eq!(value["discriminator"], "0x3fa67d351a5577e6");

        let cli = Cli::try_parse_from(["ivy-inspect", "instruction", "01020304"]).unwrap();
        let value = run(cli, &Settings::default()).unwrap();
        assert!(value["name"].is_null());
        assert!(value["discriminator"].is_null());

        let value = serde_json::to_value(classify_instruction(&[0u8; 8])).unwrap();
        assert!(value["name"].is_null());
        assert_eq!(value["discriminator"], "0x0000000000000000");
    }

    #[test]
    fn test_zero_scale_denominator_rejected() {
        let world = WorldAccount::decode(&hex::decode(world_hex(0, 1, 0)).unwrap()).unwrap();
        assert!(world_state(&world, &Settings::default()).is_err());
    }

    #[test]
    fn test_raw_account_uses_layout() {
        let data = hex::decode(world_hex(5, 1, 1)).unwrap();
        let value = decode_account(AccountKind::World, &data, true).unwrap();
        assert_eq!(value["ivy_curve_sold"], "5");
    }
}
