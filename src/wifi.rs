use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::common::error::{QRError, QRResult};

// Security
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Security {
    NoPass,
    Wep,
    #[default]
    Wpa,
}

impl Security {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPass => "nopass",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
        }
    }
}

impl TryFrom<&str> for Security {
    type Error = QRError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "nopass" => Ok(Self::NoPass),
            "WEP" => Ok(Self::Wep),
            "WPA" => Ok(Self::Wpa),
            _ => Err(QRError::UnsupportedType),
        }
    }
}

impl FromStr for Security {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for Security {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Wi-Fi credentials
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
    pub security: Security,
}

impl WifiCredentials {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>, security: &str) -> QRResult<Self> {
        let security = Security::try_from(security)?;
        Ok(Self { ssid: ssid.into(), password: password.into(), security })
    }

    // Network config string understood by Android & iOS camera apps. Values
    // are quoted as is, without escaping.
    pub fn payload(&self) -> String {
        format!("WIFI:T:{};S:\"{}\";P:\"{}\";;", self.security, self.ssid, self.password)
    }
}
