mod qr;

pub use qr::QR;

use tracing::debug;

use crate::common::{
    codec::{encode, encode_with_version},
    ec::interleave_codewords,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::default(), mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {ver}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!(metadata = %self.metadata(), len = self.data.len(), "Generating QR");

        // Encode data, into the smallest fitting version unless one is given
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => encode(self.data, self.ec_level)?,
        };
        debug!(version = *version, data_codewords = encoded_data.len(), "Encoded data");

        // Error correction & interleaving
        let payload = interleave_codewords(&encoded_data, version, self.ec_level)?;
        debug!(codewords = payload.len(), "Constructed payload with ecc & interleaving");

        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns()?;
        qr.draw_encoding_region(&payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m)?;
                m
            }
            None => apply_best_mask(&mut qr)?,
        };

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            version = *version,
            ec_level = ?self.ec_level,
            mask = *mask,
            dark_percent = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }
}
