use {
    huffpack::{compress, decompress, CompressedFile},
    std::{
        env, fs,
        io::{self, prelude::*},
        process,
    },
};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (op, input, output) = match &args[..] {
        [op, input] => (operation(op), input, None),
        [op, input, output] => (operation(op), input, Some(output)),
        _ => print_usage(),
    };

    let buf = read(input)?;
    let processed = op(&buf)?;
    write(output.map(String::as_str), &processed)?;

    if let Some(output) = output.filter(|&path| path != "-") {
        eprintln!(
            "{} {} bytes into {} bytes ({})",
            past_tense(&args[0]),
            buf.len(),
            processed.len(),
            output
        );
    }
    Ok(())
}

fn print_usage() -> ! {
    println!("Usage:");
    println!("  huffpack compress <path> [<out>]      Compress a file and write it to <out> or stdout");
    println!("  huffpack compress -                   Compress stdin and write it to stdout");
    println!("  huffpack decompress <path> [<out>]    Decompress a file and write it to <out> or stdout");
    println!("  huffpack decompress -                 Decompress stdin and write it to stdout");
    process::exit(1)
}

fn operation(name: &str) -> fn(&[u8]) -> io::Result<Vec<u8>> {
    match name {
        "compress" => |bytes: &[u8]| Ok(compress(bytes).to_bytes()),
        "decompress" => |bytes: &[u8]| {
            CompressedFile::from_bytes(bytes)
                .and_then(|file| decompress(&file))
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
        },
        _ => print_usage(),
    }
}

fn past_tense(name: &str) -> &'static str {
    match name {
        "compress" => "compressed",
        _ => "decompressed",
    }
}

fn read(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

fn write(path: Option<&str>, bytes: &[u8]) -> io::Result<()> {
    match path {
        None | Some("-") => io::stdout().write_all(bytes),
        Some(path) => fs::write(path, bytes),
    }
}
