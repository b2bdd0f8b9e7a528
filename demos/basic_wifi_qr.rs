use std::error::Error;

use wifiqr::{QRBuilder, WifiCredentials};

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - credentials in, all other settings are automatically chosen
    let creds = WifiCredentials::new("home", "hunter2", "WPA")?;
    let qr = QRBuilder::new(creds.payload().as_bytes()).build()?;

    // Convert to image and save
    let img = qr.to_image(4); // 4x scale factor
    img.save("simple_wifi_qr.png")?;

    println!("Wi-Fi QR code saved to: simple_wifi_qr.png");
    Ok(())
}
