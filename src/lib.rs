//! # wifiqr
//!
//! A Rust library for encoding Wi-Fi credentials, or any short text, into QR code symbols with
//! Reed-Solomon error correction and penalty-based mask selection.
//!
//! ## Features
//!
//! - **Version Selection**: Picks the smallest of the 40 versions that fits the data
//! - **Encoding Modes**: Numeric for all-digit payloads, binary for everything else
//! - **Reed-Solomon Error Correction**: GF(256) arithmetic with levels L, M, Q and H
//! - **Masking**: All 8 mask patterns scored in parallel, the lowest penalty wins
//! - **Rendering**: Boolean matrix, terminal string, grayscale image or SVG
//!
//! ## Quick Start
//!
//! ```rust
//! use wifiqr::{QRBuilder, WifiCredentials};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = WifiCredentials::new("home", "hunter2", "WPA")?;
//! let payload = creds.payload();
//!
//! // Only data is required, ec level defaults to L
//! let qr = QRBuilder::new(payload.as_bytes()).build()?;
//!
//! let matrix = qr.to_matrix();
//! assert_eq!(matrix.len(), qr.width());
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use wifiqr::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"WIFI:T:WEP;S:\"lab\";P:\"0123456789\";;")
//!     .version(Version::new(5)?)    // If not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::H)         // If not provided, defaults to ECLevel::L
//!     .mask(MaskPattern::new(3)?)   // If not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let svg = qr.to_svg(300);
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;
pub mod wifi;

pub use builder::{QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use wifi::{Security, WifiCredentials};
