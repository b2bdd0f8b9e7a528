use std::error::Error;

use wifiqr::{ECLevel, MaskPattern, QRBuilder, Security, Version, WifiCredentials};

fn main() -> Result<(), Box<dyn Error>> {
    let creds = WifiCredentials {
        ssid: "lab".to_string(),
        password: "0123456789".to_string(),
        security: Security::Wep,
    };
    let payload = creds.payload();

    let qr = QRBuilder::new(payload.as_bytes())
        .version(Version::new(5)?)    // QR version (size) - if not provided, finds smallest version to fit data
        .ec_level(ECLevel::H)         // Error correction level - if not provided, defaults to ECLevel::L
        .mask(MaskPattern::new(2)?)   // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    // Vector output on a fixed 300px canvas
    std::fs::write("configured_wifi_qr.svg", qr.to_svg(300))?;

    println!("Configured Wi-Fi QR code saved to: configured_wifi_qr.svg");
    println!("Version: {}, Ec level: {:?}", *qr.version(), qr.ec_level());

    Ok(())
}
