//! 3b volume file command implementations

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use vol_3b::{
    ByteOrder, ChunkStreamParser, ChunkTag, ParseResult, ParserConfig, ThreeBBuilder,
    validate_parse_result,
};

use crate::utils::{chunk_table, format_bytes, format_check};

#[derive(Subcommand)]
pub enum ThreeBCommands {
    /// Display information about a 3b file
    Info {
        /// Path to the 3b file
        file: PathBuf,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// List the chunks of a 3b file
    Chunks {
        /// Path to the 3b file
        file: PathBuf,

        #[command(flatten)]
        options: ParseOptions,

        /// Print the parse result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a 3b file (header mismatches are errors)
    Validate {
        /// Path to the 3b file
        file: PathBuf,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// Create a 3b file with placeholder chunks and a volume chunk
    Create {
        /// Path to write the 3b file
        output: PathBuf,

        /// Volume format version stored in the VOL3 chunk
        #[arg(long, value_name = "VERSION", default_value_t = 1)]
        volume_version: u32,

        /// Zero-filled volume payload size in bytes
        #[arg(long, value_name = "BYTES", default_value_t = 0)]
        volume_size: usize,

        /// Extra chunk placed before the volume chunk, as TAG:SIZE (repeatable)
        #[arg(long = "chunk", value_name = "TAG:SIZE")]
        chunks: Vec<String>,

        /// Byte order of the integer fields
        #[arg(long, value_enum, default_value_t = CliByteOrder::Little)]
        byte_order: CliByteOrder,
    },
}

/// Parser settings shared by the reading commands
#[derive(Args, Debug, Clone)]
pub struct ParseOptions {
    /// Fail on a wrong magic or sanity marker instead of warning
    #[arg(long)]
    strict: bool,

    /// Byte order of the integer fields
    #[arg(long, value_enum, default_value_t = CliByteOrder::Little)]
    byte_order: CliByteOrder,

    /// Give up after this many chunks
    #[arg(long, value_name = "COUNT")]
    max_chunks: Option<usize>,
}

impl ParseOptions {
    fn config(&self) -> ParserConfig {
        let mut config = ParserConfig::default().with_byte_order(self.byte_order.into());
        if self.strict {
            config = config.strict();
        }
        if let Some(max_chunks) = self.max_chunks {
            config = config.with_max_chunks(max_chunks);
        }
        config
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliByteOrder {
    Little,
    Big,
    Native,
}

impl From<CliByteOrder> for ByteOrder {
    fn from(value: CliByteOrder) -> Self {
        match value {
            CliByteOrder::Little => Self::Little,
            CliByteOrder::Big => Self::Big,
            CliByteOrder::Native => Self::Native,
        }
    }
}

pub fn execute(command: ThreeBCommands) -> Result<()> {
    match command {
        ThreeBCommands::Info { file, options } => execute_info(&file, &options),
        ThreeBCommands::Chunks {
            file,
            options,
            json,
        } => execute_chunks(&file, &options, json),
        ThreeBCommands::Validate { file, options } => execute_validate(&file, &options),
        ThreeBCommands::Create {
            output,
            volume_version,
            volume_size,
            chunks,
            byte_order,
        } => execute_create(&output, volume_version, volume_size, &chunks, byte_order),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))
}

fn execute_info(path: &Path, options: &ParseOptions) -> Result<()> {
    use console::style;

    let data = read_file(path)?;
    let parser = ChunkStreamParser::with_config(options.config());
    let outcome = parser.scan(&data);
    let result = &outcome.result;

    println!("\n{}", style("3b File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Size: {}", style(format_bytes(data.len() as u64)).green());
    println!("Byte order: {}", parser.config().byte_order);
    if outcome.header_truncated() {
        println!("Header: {}", style("truncated").red().bold());
    } else {
        println!("Header magic: {}", styled_check(result.header_magic_ok));
        println!(
            "Header sanity marker: {}",
            styled_check(result.header_sanity_ok)
        );
    }
    println!("Total Chunks: {}", style(result.chunks.len()).green());

    match result.volume {
        Some(volume) => println!(
            "Volume version: {} ({} byte chunk)",
            style(volume.version).yellow(),
            volume.declared_size
        ),
        None => println!("Volume version: {}", style("no VOL3 chunk").dim()),
    }

    if !result.chunks.is_empty() {
        println!("\n{}", style("Chunk Summary").bold());
        chunk_table(&result.chunks).printstd();
    }

    if let Some(error) = &outcome.error {
        println!(
            "\n{} {}",
            style("Parsing stopped early:").red().bold(),
            error
        );
    }

    Ok(())
}

fn styled_check(ok: bool) -> console::StyledObject<&'static str> {
    let text = format_check(ok);
    if ok {
        console::style(text).green()
    } else {
        console::style(text).red().bold()
    }
}

fn execute_chunks(path: &Path, options: &ParseOptions, json: bool) -> Result<()> {
    let data = read_file(path)?;
    let parser = ChunkStreamParser::with_config(options.config());
    let result = parser
        .parse(&data)
        .with_context(|| format!("Failed to parse 3b file: {}", path.display()))?;

    if json {
        print_json(&result)
    } else {
        chunk_table(&result.chunks).printstd();
        Ok(())
    }
}

#[cfg(feature = "json")]
fn print_json(result: &ParseResult) -> Result<()> {
    println!("{}", result.to_json().context("Failed to serialize parse result")?);
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print_json(_result: &ParseResult) -> Result<()> {
    anyhow::bail!("JSON output requires the `json` feature")
}

fn execute_validate(path: &Path, options: &ParseOptions) -> Result<()> {
    use console::style;

    let data = read_file(path)?;
    let parser = ChunkStreamParser::with_config(options.config().strict());
    let result = parser
        .parse(&data)
        .with_context(|| format!("Failed to parse 3b file: {}", path.display()))?;

    match validate_parse_result(&result) {
        Ok(()) => {
            println!(
                "✓ 3b file '{}' is valid ({} chunks, volume version {})",
                style(path.display()).cyan(),
                result.chunks.len(),
                style(result.volume_version().unwrap_or_default()).yellow()
            );
        }
        Err(err) => {
            anyhow::bail!("Validation failed: {}", err);
        }
    }

    Ok(())
}

/// Parse a `TAG:SIZE` chunk argument
fn parse_chunk_arg(arg: &str) -> Result<(ChunkTag, usize)> {
    let (tag, size) = arg
        .split_once(':')
        .with_context(|| format!("Expected TAG:SIZE, got '{}'", arg))?;

    let bytes: [u8; 4] = tag
        .as_bytes()
        .try_into()
        .with_context(|| format!("Chunk tag '{}' must be exactly 4 bytes", tag))?;
    let tag = ChunkTag::from_bytes(bytes);
    if tag.is_volume() {
        anyhow::bail!("Use --volume-version to add the VOL3 chunk");
    }

    let size = size
        .parse::<usize>()
        .with_context(|| format!("Invalid chunk size '{}'", size))?;
    Ok((tag, size))
}

fn execute_create(
    output: &Path,
    volume_version: u32,
    volume_size: usize,
    chunks: &[String],
    byte_order: CliByteOrder,
) -> Result<()> {
    use console::style;

    let mut builder = ThreeBBuilder::new().with_byte_order(byte_order.into());
    for arg in chunks {
        let (tag, size) = parse_chunk_arg(arg)?;
        builder = builder.chunk(tag, vec![0; size]);
    }
    builder = builder.volume(volume_version, vec![0; volume_size]);

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    builder
        .write_to(&mut writer)
        .context("Failed to write 3b file")?;

    println!(
        "✓ Created '{}' with {} chunks",
        style(output.display()).cyan(),
        chunks.len() + 1
    );
    Ok(())
}
