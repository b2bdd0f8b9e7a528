#[cfg(test)]
mod qr_proptests {

    use prop::string::string_regex;
    use proptest::prelude::*;

    use wifiqr::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn security_strategy() -> BoxedStrategy<Security> {
        prop_oneof![Just(Security::NoPass), Just(Security::Wep), Just(Security::Wpa)].boxed()
    }

    pub fn qr_strategy(regex: String) -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(move |ecl| {
            let max_sz = match ecl {
                ECLevel::L => 2953,
                ECLevel::M => 2331,
                ECLevel::Q => 1663,
                ECLevel::H => 1273,
            };
            let pattern = format!(r"{}{{1,{}}}", regex, max_sz);
            string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    fn decode(qr: &QR) -> (usize, String) {
        let mut img = rqrr::PreparedImage::prepare(qr.to_image(3));
        let grids = img.detect_grids();
        let (meta, content) = grids[0].decode().expect("Failed to read QR");
        (meta.version.0, content)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        #[ignore]
        fn proptest_numeric(params in qr_strategy("[0-9]".to_string())) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            let (ver, decoded) = decode(&qr);

            prop_assert_eq!(*qr.version(), ver);
            prop_assert_eq!(data, decoded);
        }

        #[test]
        #[ignore]
        fn proptest_binary(params in qr_strategy(r"[0-9A-Za-z $%*+\-./:;]".to_string())) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            let (ver, decoded) = decode(&qr);

            prop_assert_eq!(*qr.version(), ver);
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_wifi(
            ssid in "[A-Za-z0-9_-]{1,32}",
            password in "[A-Za-z0-9!@#]{0,63}",
            security in security_strategy(),
            ecl in ec_level_strategy(),
        ) {
            let creds = WifiCredentials { ssid, password, security };
            let payload = creds.payload();

            let qr = QRBuilder::new(payload.as_bytes()).ec_level(ecl).build().unwrap();
            let (_ver, decoded) = decode(&qr);

            prop_assert_eq!(payload, decoded);
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use wifiqr::{ECLevel, MaskPattern, QRBuilder, QRError, Version, WifiCredentials};

    fn decode(img: image::GrayImage) -> (usize, String) {
        let mut img = rqrr::PreparedImage::prepare(img);
        let grids = img.detect_grids();
        assert_eq!(grids.len(), 1);
        let (meta, content) = grids[0].decode().expect("Failed to read QR");
        (meta.version.0, content)
    }

    #[test_case("Hello World!".to_string(), 1, ECLevel::L)]
    #[test_case("TEST1234ab".to_string(), 1, ECLevel::M)]
    #[test_case("nopass".to_string(), 1, ECLevel::Q)]
    #[test_case("OK".to_string(), 1, ECLevel::H)]
    #[test_case("abcdefghij".repeat(15), 7, ECLevel::L)]
    #[test_case("abcdefghij".repeat(12), 7, ECLevel::M)]
    #[test_case("abcdefghij".repeat(8), 7, ECLevel::Q)]
    #[test_case("1234567890".repeat(15), 7, ECLevel::H)]
    #[test_case("WIFI:T:WEP;".repeat(24), 10, ECLevel::L)]
    #[test_case("abcdefghij".repeat(21), 10, ECLevel::M)]
    #[test_case("abcdefghij".repeat(15), 10, ECLevel::Q)]
    #[test_case("1234567890".repeat(28), 10, ECLevel::H)]
    #[test_case("abcdefghij".repeat(146), 27, ECLevel::L)]
    #[test_case("abcdefghij".repeat(112), 27, ECLevel::M)]
    #[test_case("abcdefghij".repeat(80), 27, ECLevel::Q)]
    #[test_case("1234567890".repeat(145), 27, ECLevel::H)]
    #[test_case("abcdefghij".repeat(295), 40, ECLevel::L)]
    #[test_case("abcdefghij".repeat(233), 40, ECLevel::M)]
    #[test_case("abcdefghij".repeat(166), 40, ECLevel::Q)]
    #[test_case("1234567890".repeat(305), 40, ECLevel::H)]
    fn test_qr(data: String, ver: usize, ecl: ECLevel) {
        let qr = QRBuilder::new(data.as_bytes())
            .version(Version::new(ver).unwrap())
            .ec_level(ecl)
            .build()
            .unwrap();

        let (decoded_ver, decoded) = decode(qr.to_image(10));

        assert_eq!(ver, decoded_ver);
        assert_eq!(data, decoded);
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(2)]
    #[test_case(3)]
    #[test_case(4)]
    #[test_case(5)]
    #[test_case(6)]
    #[test_case(7)]
    fn test_qr_forced_mask(mask: u8) {
        let data = "WIFI:T:WPA;S:\"home\";P:\"correct horse battery staple\";;";
        let mask = MaskPattern::new(mask).unwrap();
        let qr = QRBuilder::new(data.as_bytes()).ec_level(ECLevel::Q).mask(mask).build().unwrap();

        let (_ver, decoded) = decode(qr.to_image(10));

        assert_eq!(qr.mask(), Some(mask));
        assert_eq!(data, decoded);
    }

    #[test_case("home", "hunter2", "WPA")]
    #[test_case("Office 5G", "s3cr3t-p4ss", "WEP")]
    #[test_case("cafe", "", "nopass")]
    fn test_wifi_credentials(ssid: &str, password: &str, security: &str) {
        let creds = WifiCredentials::new(ssid, password, security).unwrap();
        let payload = creds.payload();

        let qr = QRBuilder::new(payload.as_bytes()).ec_level(ECLevel::M).build().unwrap();
        let (_ver, decoded) = decode(qr.to_image(10));

        assert_eq!(payload, decoded);
        assert!(decoded.starts_with(&format!("WIFI:T:{security};")));
    }

    #[test]
    fn test_qr_data_overflow() {
        let data = "1234567890".repeat(306);

        let res = QRBuilder::new(data.as_bytes())
            .version(Version::new(40).unwrap())
            .ec_level(ECLevel::H)
            .build();

        assert!(matches!(res, Err(QRError::CapacityExceeded { .. })));
    }

    #[test]
    fn test_svg_render() {
        let qr = QRBuilder::new(b"WIFI:T:nopass;S:\"cafe\";P:\"\";;").build().unwrap();
        let svg = qr.to_svg(300);
        let dark = qr.count_dark_modules();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="300" height="300""#));
        // One background rect plus one per dark module
        assert_eq!(svg.matches("<rect").count(), dark + 1);
    }
}
