use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wifiqr::{ECLevel, MaskPattern, QRBuilder, Security, Version, WifiCredentials};

#[derive(Parser)]
#[command(name = "wifiqr", version, about = "Encode Wi-Fi credentials into a QR code")]
struct Cli {
    /// Network name
    #[arg(long)]
    ssid: String,
    /// Network password, empty for open networks
    #[arg(long, default_value = "")]
    password: String,
    /// One of nopass, WEP, WPA
    #[arg(long, default_value = "WPA")]
    security: Security,
    /// Error correction level: L, M, Q or H
    #[arg(long, default_value = "L")]
    ec_level: ECLevel,
    /// Force a mask pattern in 0..=7 instead of the penalty search
    #[arg(long, value_parser = parse_mask)]
    mask: Option<MaskPattern>,
    /// Force a version in 1..=40 instead of the smallest fitting one
    #[arg(long, value_parser = parse_version)]
    version_number: Option<Version>,
    /// Output file, .svg for vector output, any other image extension for raster
    #[arg(long)]
    output: Option<PathBuf>,
    /// Canvas size in pixels for svg output
    #[arg(long, default_value_t = 300)]
    canvas: u32,
    /// Pixels per module for raster output
    #[arg(long, default_value_t = 8)]
    scale: u32,
    /// Log pipeline stages, unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

fn parse_mask(s: &str) -> Result<MaskPattern, Box<dyn Error + Send + Sync>> {
    Ok(MaskPattern::new(s.parse()?)?)
}

fn parse_version(s: &str) -> Result<Version, Box<dyn Error + Send + Sync>> {
    Ok(Version::new(s.parse()?)?)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "wifiqr=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let creds = WifiCredentials { ssid: cli.ssid, password: cli.password, security: cli.security };
    let payload = creds.payload();

    let mut builder = QRBuilder::new(payload.as_bytes());
    builder.ec_level(cli.ec_level);
    if let Some(v) = cli.version_number {
        builder.version(v);
    }
    if let Some(m) = cli.mask {
        builder.mask(m);
    }
    let qr = builder.build()?;
    info!(
        version = *qr.version(),
        ec_level = ?qr.ec_level(),
        recovery_percent = qr.ec_level().recovery_percent(),
        mask = ?qr.mask(),
        "Generated QR"
    );

    match cli.output {
        Some(path) if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("svg")) => {
            std::fs::write(&path, qr.to_svg(cli.canvas))?;
            info!(path = %path.display(), "Saved svg");
        }
        Some(path) => {
            qr.to_image(cli.scale).save(&path)?;
            info!(path = %path.display(), "Saved image");
        }
        None => println!("{}", qr.to_str(1)),
    }

    Ok(())
}
