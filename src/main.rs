use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use peekread::reader::{BufferedStreamReader, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_BUFFER_SIZE, ReaderBuilder};
use peekread::stream::{ByteStream, FileStream, ReadStream};

/// Streams a file through a buffered reader and prints hex chunks
#[derive(Parser)]
struct Args {
    /// Path to input file (use "-" to read from stdin)
    input: Option<PathBuf>,

    /// Bytes requested per physical read
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Maximum number of buffered bytes
    #[arg(long = "max-buffer", default_value_t = DEFAULT_MAX_BUFFER_SIZE)]
    max_buffer_size: usize,

    /// Bytes consumed per printed line
    #[arg(long, default_value_t = 16)]
    read_size: usize,

    /// Print the next N bytes before every read
    #[arg(long)]
    peek: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.input.as_ref().and_then(|p| p.to_str()) {
        Some("-") | None => {
            let stream = ReadStream::new(io::stdin());
            let reader = build_reader(stream, &args)?;
            dump(reader, &args, &mut out)?;
        }
        Some(path) => {
            let stream = FileStream::open(path)?;
            let reader = build_reader(stream, &args)?;
            dump(reader, &args, &mut out)?;
        }
    }
    Ok(())
}

fn build_reader<S: ByteStream>(
    stream: S,
    args: &Args,
) -> peekread::reader::Result<BufferedStreamReader<S>> {
    ReaderBuilder::new(stream)
        .chunk_size(args.chunk_size)
        .max_buffer_size(args.max_buffer_size)
        .build()
}

fn dump<S: ByteStream, W: Write>(
    mut reader: BufferedStreamReader<S>,
    args: &Args,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let read_size = args.read_size.max(1);

    loop {
        if let Some(n) = args.peek {
            let ahead = reader.peek(n)?;
            writeln!(out, "  peek: {}", to_hex(&ahead))?;
        }

        let offset = reader.position();
        let chunk = reader.read(read_size)?;
        if !chunk.is_empty() {
            writeln!(out, "{offset:08x}: {}", to_hex(&chunk))?;
        }
        if chunk.len() < read_size {
            break;
        }
    }

    writeln!(out, "total: {} bytes", reader.position())?;
    reader.close();
    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
