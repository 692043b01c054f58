#![deny(unsafe_code)]
//! CLI binary for color descriptor parsing and conversion.
//!
//! Subcommands:
//! - `parse <descriptor>`: show the color in every model
//! - `convert <descriptor> --to <model>`: show one model
//! - `contrast <a> <b>`: WCAG contrast ratio
//! - `mix <a> <b>`: interpolate two colors
//! - `names`: list the named color keywords
//!
//! A descriptor is any color string (`"#c0ffee"`, `"hsl(120 50% 50%)"`,
//! `"teal"`) or a JSON object of channel fields (`'{"x":0.2,"y":0.3,"z":0.4}'`).

mod error;

use chroma_core::blend;
use chroma_core::named;
use chroma_core::util::{round, MAX_PRECISION};
use chroma_core::{color, ColorValue};
use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use serde_json::json;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chroma", about = "Parse and convert color descriptors")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Decimal digits for printed numbers (0 to 15).
    #[arg(
        long,
        global = true,
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PRECISION))
    )]
    precision: u32,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a descriptor and print it in every model.
    Parse {
        /// Color string or JSON object.
        descriptor: String,
    },
    /// Convert a descriptor to one model.
    Convert {
        /// Color string or JSON object.
        descriptor: String,

        /// Target model.
        #[arg(long, value_enum)]
        to: Target,
    },
    /// Print the WCAG contrast ratio of two colors.
    Contrast {
        a: String,
        b: String,
    },
    /// Interpolate between two colors.
    Mix {
        a: String,
        b: String,

        /// Position between `a` (0) and `b` (1).
        #[arg(long, default_value_t = 0.5)]
        amount: f64,

        /// Interpolate in CIE Lab instead of sRGB.
        #[arg(long)]
        lab: bool,
    },
    /// List the named color keywords.
    Names,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Rgb,
    Hex,
    Hsl,
    Hwb,
    Xyz,
    Lab,
    Lch,
}

impl Target {
    const ALL: [Target; 7] = [
        Target::Rgb,
        Target::Hex,
        Target::Hsl,
        Target::Hwb,
        Target::Xyz,
        Target::Lab,
        Target::Lch,
    ];

    fn name(self) -> &'static str {
        match self {
            Target::Rgb => "rgb",
            Target::Hex => "hex",
            Target::Hsl => "hsl",
            Target::Hwb => "hwb",
            Target::Xyz => "xyz",
            Target::Lab => "lab",
            Target::Lch => "lch",
        }
    }
}

/// Reads a CLI descriptor: JSON when it starts with `{`, a color string otherwise.
fn read_descriptor(raw: &str) -> Result<ColorValue, CliError> {
    let found = if raw.trim_start().starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| CliError::Input(format!("invalid JSON descriptor: {e}")))?;
        color(&value)?
    } else {
        color(raw)?
    };
    let value = found.ok_or_else(|| CliError::Unrecognized(raw.to_string()))?;
    debug!(space = value.space().name(), "parsed descriptor");
    Ok(value)
}

/// CSS-like text for one model.
fn render_text(value: &ColorValue, target: Target, precision: u32) -> String {
    let p = precision as usize;
    match target {
        Target::Rgb => format!("{:.*}", p, value.to_srgb()),
        Target::Hex => value.to_srgb().to_hex(),
        Target::Hsl => value.to_srgb().to_hsl_string(precision),
        Target::Hwb => value.to_srgb().to_hwb_string(precision),
        Target::Xyz => format!("{:.*}", p, value.to_xyz()),
        Target::Lab => format!("{:.*}", p, value.to_lab()),
        Target::Lch => format!("{:.*}", p, value.to_lch()),
    }
}

/// Rounded channel object for one model.
fn render_json(value: &ColorValue, target: Target, precision: u32) -> serde_json::Value {
    let r = |v: f64| round(v, precision);
    let alpha = r(value.alpha());
    match target {
        Target::Rgb => {
            let c = value.to_srgb();
            json!({"red": r(c.red()), "green": r(c.green()), "blue": r(c.blue()), "alpha": alpha})
        }
        Target::Hex => json!(value.to_srgb().to_hex()),
        Target::Hsl => {
            let c = value.to_hsl();
            json!({"hue": r(c.hue), "saturation": r(c.saturation), "lightness": r(c.lightness), "alpha": alpha})
        }
        Target::Hwb => {
            let c = value.to_hwb();
            json!({"hue": r(c.hue), "whiteness": r(c.whiteness), "blackness": r(c.blackness), "alpha": alpha})
        }
        Target::Xyz => {
            let c = value.to_xyz();
            json!({"x": r(c.x()), "y": r(c.y()), "z": r(c.z()), "alpha": alpha})
        }
        Target::Lab => {
            let c = value.to_lab();
            json!({"lightness": r(c.lightness()), "a": r(c.a()), "b": r(c.b()), "alpha": alpha})
        }
        Target::Lch => {
            let c = value.to_lch();
            json!({"lightness": r(c.lightness()), "chroma": r(c.chroma()), "hue": r(c.hue()), "alpha": alpha})
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let precision = cli.precision;
    match cli.command {
        Command::Parse { descriptor } => {
            let value = read_descriptor(&descriptor)?;
            if cli.json {
                let mut out = serde_json::Map::new();
                out.insert("space".into(), json!(value.space().name()));
                for target in Target::ALL {
                    out.insert(target.name().into(), render_json(&value, target, precision));
                }
                print_json(&serde_json::Value::Object(out))?;
            } else {
                for target in Target::ALL {
                    println!("{:<4} {}", target.name(), render_text(&value, target, precision));
                }
            }
        }
        Command::Convert { descriptor, to } => {
            let value = read_descriptor(&descriptor)?;
            info!(from = value.space().name(), to = to.name(), "converting");
            if cli.json {
                print_json(&render_json(&value, to, precision))?;
            } else {
                println!("{}", render_text(&value, to, precision));
            }
        }
        Command::Contrast { a, b } => {
            let a = read_descriptor(&a)?.to_srgb();
            let b = read_descriptor(&b)?.to_srgb();
            let ratio = round(blend::contrast(&a, &b), precision);
            if cli.json {
                print_json(&json!({"a": a.to_hex(), "b": b.to_hex(), "contrast": ratio}))?;
            } else {
                println!("{ratio}");
            }
        }
        Command::Mix { a, b, amount, lab } => {
            if amount.is_nan() {
                return Err(CliError::Input("--amount must be a number".into()));
            }
            let a = read_descriptor(&a)?.to_srgb();
            let b = read_descriptor(&b)?.to_srgb();
            let mixed = if lab {
                blend::mix_lab(&a, &b, amount)
            } else {
                blend::mix(&a, &b, amount)
            };
            let value = ColorValue::Srgb(mixed);
            if cli.json {
                print_json(&json!({
                    "hex": mixed.to_hex(),
                    "rgb": render_json(&value, Target::Rgb, precision),
                }))?;
            } else {
                println!("{}", render_text(&value, Target::Rgb, precision));
            }
        }
        Command::Names => {
            let names: Vec<&str> = named::names().collect();
            if cli.json {
                print_json(&json!(names))?;
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr. `-v` flags win over `RUST_LOG`; without either, warn.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["chroma", "-vv", "--precision", "1", "convert", "red", "--to", "lab"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.precision, 1);
        assert!(matches!(cli.command, Command::Convert { to: Target::Lab, .. }));
    }

    #[test]
    fn precision_is_bounded() {
        assert!(Cli::try_parse_from(["chroma", "--precision", "400", "names"]).is_err());
        assert!(Cli::try_parse_from(["chroma", "--precision", "16", "names"]).is_err());
        let cli = Cli::try_parse_from(["chroma", "--precision", "15", "names"]).unwrap();
        assert_eq!(cli.precision, 15);
    }

    #[test]
    fn read_descriptor_accepts_strings_and_json() {
        let red = read_descriptor("red").unwrap();
        let json = read_descriptor(r#"{"red": 255, "green": 0, "blue": 0}"#).unwrap();
        assert_eq!(red, json);
    }

    #[test]
    fn read_descriptor_error_codes() {
        assert_eq!(read_descriptor("blurple").unwrap_err().exit_code(), 11);
        assert_eq!(read_descriptor("#12").unwrap_err().exit_code(), 10);
        assert_eq!(read_descriptor("{oops").unwrap_err().exit_code(), 12);
        assert_eq!(read_descriptor(r#"{"red": 1}"#).unwrap_err().exit_code(), 11);
    }

    #[test]
    fn text_rendering() {
        let red = read_descriptor("#ff0000").unwrap();
        assert_eq!(render_text(&red, Target::Rgb, 3), "rgb(255 0 0)");
        assert_eq!(render_text(&red, Target::Hex, 3), "#ff0000");
        assert_eq!(render_text(&red, Target::Hsl, 3), "hsl(0 100% 50%)");
        assert_eq!(render_text(&red, Target::Hwb, 3), "hwb(0 0% 0%)");
        assert!(render_text(&red, Target::Lab, 1).starts_with("lab(53.2 80.1 67.2"));
    }

    #[test]
    fn json_rendering_rounds() {
        let red = read_descriptor("red").unwrap();
        let lab = render_json(&red, Target::Lab, 0);
        assert_eq!(lab["lightness"], json!(53.0));
        assert_eq!(lab["alpha"], json!(1.0));
        assert_eq!(render_json(&red, Target::Hex, 3), json!("#ff0000"));
    }
}
