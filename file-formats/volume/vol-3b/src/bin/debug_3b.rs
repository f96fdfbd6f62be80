#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::fs;
use vol_3b::ChunkStreamParser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <3b-file>", args[0]);
        std::process::exit(1);
    }

    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Cannot open {}: {}", args[1], e);
            std::process::exit(1);
        }
    };

    let outcome = ChunkStreamParser::new().scan(&data);
    let result = &outcome.result;

    println!("File size: {} bytes", data.len());
    if outcome.header_truncated() {
        println!("Header: truncated");
    } else {
        println!(
            "Header magic: {}",
            if result.header_magic_ok { "ok" } else { "MISMATCH" }
        );
        println!(
            "Header sanity marker: {}",
            if result.header_sanity_ok { "ok" } else { "MISMATCH" }
        );
    }

    println!("\nChunk List:");
    println!("{:<16} {:<12} {:<12}", "Tag", "Offset", "Size");
    println!("{:-<40}", "");
    for chunk in &result.chunks {
        println!(
            "{:<16} 0x{:08X}   {:<8}",
            chunk.tag.to_string(),
            chunk.offset,
            chunk.declared_size
        );
    }

    match result.volume {
        Some(volume) => println!("\nVolume version: {}", volume.version),
        None => println!("\nNo volume chunk found"),
    }

    if let Some(error) = &outcome.error {
        println!("Parsing stopped early: {}", error);
    }
}
