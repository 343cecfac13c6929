// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `fixq`: inspect, convert and evaluate deterministic fixed-point values.
//!
//! # Usage
//! ```text
//! fixq [--kind fix16|ufix16|ufix8] [--culture NAME] [--config-dir DIR] <command>
//!
//! fixq info                         constants and limits of the kind
//! fixq convert 2.5 --to int32       decimal -> value, then to other types
//! fixq raw 0x28000                  raw storage integer -> value
//! fixq eval 32767 add 1 --policy saturating
//! fixq func sin 1.5707963
//! fixq format 12345.5 N2 --culture de-DE
//! fixq prefs --kind ufix8 --save    persist the effective preferences
//! ```
//!
//! Stored preferences live in the platform config directory unless
//! `--config-dir` is given; flags override them for one run. Log verbosity
//! follows `RUST_LOG`.

#![forbid(unsafe_code)]
// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fixq_core::{FixedPoint, Kind, NumberFormat, TypeTag, I16F16, U16F16, U8F8};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{CliPrefs, ConfigService, FsConfigStore, KindChoice, PREFS_KEY};

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic fixed-point toolbox")]
struct Args {
    /// Directory holding prefs.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    /// Representation to operate on (overrides stored prefs)
    #[arg(long, value_enum, global = true)]
    kind: Option<KindChoice>,
    /// Built-in culture for formatting, e.g. en-US, de-DE (overrides stored prefs)
    #[arg(long, global = true)]
    culture: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the constants and limits of the kind.
    Info,
    /// Parse a decimal exactly and convert it to other types.
    Convert {
        /// Decimal text, e.g. 2.5 or -0.25 or 1e3
        value: String,
        /// Target type names (Int32, Double, String, UFix8, ...); repeatable
        #[arg(long)]
        to: Vec<TypeTag>,
    },
    /// Decode a raw storage integer (decimal or 0x-prefixed hex).
    Raw {
        /// Raw bits, e.g. 163840 or 0x28000 or -0x1
        #[arg(allow_hyphen_values = true)]
        raw: String,
    },
    /// Apply a binary operator under an overflow policy.
    Eval {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        /// Operator
        #[arg(value_enum)]
        op: BinOp,
        /// Right operand
        #[arg(allow_hyphen_values = true)]
        rhs: String,
        /// Overflow policy
        #[arg(long, value_enum, default_value_t = Policy::Checked)]
        policy: Policy,
    },
    /// Evaluate an elementary function.
    Func {
        /// Function name
        #[arg(value_enum)]
        func: Func,
        /// Argument (for atan2, the y coordinate)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Second argument (atan2's x coordinate)
        #[arg(allow_hyphen_values = true)]
        x: Option<String>,
    },
    /// Format a value with a standard or custom pattern.
    Format {
        /// Decimal text
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Pattern such as F2, N0, E3, P1, #,##0.00 (defaults to stored prefs)
        pattern: Option<String>,
    },
    /// Show the effective preferences, optionally persisting them.
    Prefs {
        /// Write the effective preferences to the config store
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Two's-complement wraparound
    Wrapping,
    /// Fail on overflow
    Checked,
    /// Clamp to MIN/MAX
    Saturating,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Func {
    Sqrt,
    Exp,
    Sin,
    Cos,
    Tan,
    Atan,
    Atan2,
    Asin,
    Acos,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new().context("resolve config dir")?,
    };
    debug!(dir = %store.base().display(), "config store");
    let service = ConfigService::new(store);
    let stored = service
        .load::<CliPrefs>(PREFS_KEY)
        .context("load preferences")?
        .unwrap_or_default();
    let prefs = stored.with_overrides(args.kind, args.culture.as_deref());
    debug!(kind = ?prefs.kind, culture = %prefs.culture, "resolved preferences");

    if let Command::Prefs { save } = args.command {
        if save {
            service.save(PREFS_KEY, &prefs).context("save preferences")?;
            info!("preferences saved");
        }
        println!("{}", serde_json::to_string_pretty(&prefs)?);
        return Ok(());
    }

    let culture = prefs.number_format()?;
    debug!(command = ?args.command, "dispatch");
    let output = dispatch(&args.command, &prefs, &culture)?;
    println!("{output}");
    Ok(())
}

fn dispatch(command: &Command, prefs: &CliPrefs, culture: &NumberFormat) -> Result<String> {
    match prefs.kind {
        KindChoice::Fix16 => run::<I16F16>(command, prefs, culture),
        KindChoice::Ufix16 => run::<U16F16>(command, prefs, culture),
        KindChoice::Ufix8 => run::<U8F8>(command, prefs, culture),
    }
}

fn parse<K: Kind>(text: &str) -> Result<FixedPoint<K>> {
    text.parse()
        .with_context(|| format!("`{text}` as {}", K::NAME))
}

fn parse_raw<K: Kind>(text: &str) -> Result<FixedPoint<K>> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16),
        None => digits.parse::<i128>(),
    }
    .with_context(|| format!("raw value `{text}`"))?;
    let wide = if negative { -magnitude } else { magnitude };
    K::try_narrow(wide)
        .map(FixedPoint::from_raw)
        .ok_or_else(|| anyhow!("raw value `{text}` does not fit in {}", K::NAME))
}

fn run<K: Kind>(command: &Command, prefs: &CliPrefs, culture: &NumberFormat) -> Result<String> {
    let mut out = String::new();
    match command {
        Command::Info => info_lines::<K>(&mut out)?,
        Command::Convert { value, to } => {
            let value = parse::<K>(value)?;
            writeln!(out, "{value:?}")?;
            for &tag in to {
                let converted = value.to_type(Some(tag), culture)?;
                writeln!(out, "{tag}: {converted}")?;
            }
        }
        Command::Raw { raw } => {
            let value = parse_raw::<K>(raw)?;
            writeln!(out, "{value:?}")?;
            writeln!(out, "f64: {}", value.to_f64())?;
        }
        Command::Eval {
            lhs,
            op,
            rhs,
            policy,
        } => {
            let result = eval(parse::<K>(lhs)?, *op, parse::<K>(rhs)?, *policy)?;
            writeln!(out, "{result:?}")?;
        }
        Command::Func { func, value, x } => {
            let value = parse::<K>(value)?;
            let x = x.as_deref().map(parse::<K>).transpose()?;
            match apply(*func, value, x)? {
                Some(result) => writeln!(out, "{result:?}")?,
                None => writeln!(out, "undefined")?,
            }
        }
        Command::Format { value, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(&prefs.format);
            writeln!(out, "{}", parse::<K>(value)?.format_with(pattern, culture)?)?;
        }
        Command::Prefs { .. } => writeln!(out, "{}", serde_json::to_string_pretty(prefs)?)?,
    }
    Ok(out.trim_end().to_owned())
}

fn info_lines<K: Kind>(out: &mut String) -> Result<()> {
    writeln!(
        out,
        "{}: {} storage bits, {} fractional, {}",
        K::NAME,
        core::mem::size_of::<K::Raw>() * 8,
        K::FRAC_BITS,
        if K::SIGNED { "signed" } else { "unsigned" }
    )?;
    let constants = [
        ("MIN", FixedPoint::<K>::MIN),
        ("MAX", FixedPoint::<K>::MAX),
        ("EPSILON", FixedPoint::<K>::EPSILON),
        ("ONE", FixedPoint::<K>::ONE),
        ("PI", FixedPoint::<K>::PI),
        ("E", FixedPoint::<K>::E),
        ("PI_DIV_FOUR", FixedPoint::<K>::PI_DIV_FOUR),
        ("THREE_PI_DIV_FOUR", FixedPoint::<K>::THREE_PI_DIV_FOUR),
        ("FOUR_DIV_PI", FixedPoint::<K>::FOUR_DIV_PI),
        ("FOUR_DIV_PI2", FixedPoint::<K>::FOUR_DIV_PI2),
    ];
    for (name, value) in constants {
        writeln!(out, "{name:<18}{value:?}")?;
    }
    Ok(())
}

fn eval<K: Kind>(
    lhs: FixedPoint<K>,
    op: BinOp,
    rhs: FixedPoint<K>,
    policy: Policy,
) -> Result<FixedPoint<K>> {
    let result = match (policy, op) {
        (Policy::Wrapping, BinOp::Add) => lhs.wrapping_add(rhs),
        (Policy::Wrapping, BinOp::Sub) => lhs.wrapping_sub(rhs),
        (Policy::Wrapping, BinOp::Mul) => lhs.wrapping_mul(rhs),
        (Policy::Wrapping, BinOp::Div) => lhs.wrapping_div(rhs)?,
        (Policy::Checked, BinOp::Add) => lhs.checked_add(rhs)?,
        (Policy::Checked, BinOp::Sub) => lhs.checked_sub(rhs)?,
        (Policy::Checked, BinOp::Mul) => lhs.checked_mul(rhs)?,
        (Policy::Checked, BinOp::Div) => lhs.checked_div(rhs)?,
        (Policy::Saturating, BinOp::Add) => lhs.saturating_add(rhs),
        (Policy::Saturating, BinOp::Sub) => lhs.saturating_sub(rhs),
        (Policy::Saturating, BinOp::Mul) => lhs.saturating_mul(rhs),
        (Policy::Saturating, BinOp::Div) => lhs.saturating_div(rhs)?,
    };
    Ok(result)
}

fn apply<K: Kind>(
    func: Func,
    value: FixedPoint<K>,
    x: Option<FixedPoint<K>>,
) -> Result<Option<FixedPoint<K>>> {
    let result = match func {
        Func::Sqrt => Some(value.sqrt()),
        Func::Exp => Some(value.exp()),
        Func::Sin => Some(value.sin()),
        Func::Cos => Some(value.cos()),
        Func::Tan => value.tan(),
        Func::Atan => Some(value.atan()),
        Func::Atan2 => {
            let x = x.ok_or_else(|| anyhow!("atan2 needs both y and x"))?;
            Some(value.atan2(x))
        }
        Func::Asin => value.asin(),
        Func::Acos => value.acos(),
    };
    Ok(result)
}
