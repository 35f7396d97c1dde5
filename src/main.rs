use std::io::{self, BufRead, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use qrbyte::{Codewords, QRBuilder, QRError, QRResult, MAX_DATA_LEN};

#[derive(Parser, Debug)]
#[command(name = "qrbyte", version, about = "Encodes one line from stdin as a QR code")]
struct Cli {
    /// Write the symbol as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the symbol as `;` separated 1/0 rows.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the symbol as a grayscale PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per module in the PNG output.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Mark structural and format modules in the text output.
    #[arg(long)]
    debug: bool,
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() {
    let cli = Cli::parse();
    setup_tracing();

    if let Err(err) = run(&cli) {
        error!(%err, "Encoding failed");
        process::exit(err.status_code());
    }
}

fn run(cli: &Cli) -> QRResult<()> {
    println!("--- QR-Code Encoder ---\n\nPlease enter a text:");
    let text = read_message(io::stdin().lock())?;
    println!("\nMessage: {}\nLength: {}\n", String::from_utf8_lossy(&text), text.len());

    let builder = QRBuilder::new(&text);
    let Codewords { flavor, data, ecc } = builder.codewords()?;
    println!("QR-Code: {}-{}\n", *flavor.version, flavor.ec_level);
    println!("Message data codewords:\n{}", hex_list(&data));
    println!("Error correction codewords:\n{}\n", hex_list(&ecc));

    let qr = builder.build()?;
    if cli.debug {
        println!("{}", qr.to_marked_str());
    } else {
        println!("{}", qr.to_str());
    }

    if let Some(path) = &cli.svg {
        qr.save_svg(path)?;
    }
    if let Some(path) = &cli.csv {
        qr.save_csv(path)?;
    }
    if let Some(path) = &cli.png {
        qr.save_png(path, cli.scale)?;
    }
    debug!("{}", qr.metadata());

    Ok(())
}

// Reads bytes up to the first newline or end of input, buffering at most one byte past
// the longest accepted line and its `\r\n`
fn read_message(reader: impl BufRead) -> QRResult<Vec<u8>> {
    let mut line = Vec::new();
    reader.take(MAX_DATA_LEN as u64 + 3).read_until(b'\n', &mut line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    if line.len() > MAX_DATA_LEN {
        return Err(QRError::DataTooLong);
    }
    Ok(line)
}

fn hex_list(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("0x{b:02X}")).collect::<Vec<_>>().join(", ")
}
