//! Certificate extraction utilities.

use anyhow::Result;
use chrono::{DateTime, Utc};
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;

/// Metadata of the leaf certificate presented by a server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LeafCertificate {
    pub issuer: String,
    pub subject: String,
    pub not_before: Option<DateTime<Utc>>,
    pub not_after: Option<DateTime<Utc>>,
    pub dns_names: Vec<String>,
    pub common_name: String,
    /// Decimal rendering of the serial number
    pub serial_number: String,
}

/// Parses a DER-encoded certificate into [`LeafCertificate`].
///
/// # Errors
///
/// Returns an error if the bytes are not a valid X.509 certificate.
pub(crate) fn parse_leaf(der: &[u8]) -> Result<LeafCertificate> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)?;
    let tbs_cert = &cert.tbs_certificate;

    let common_name = tbs_cert
        .subject
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string();

    Ok(LeafCertificate {
        issuer: tbs_cert.issuer.to_string(),
        subject: tbs_cert.subject.to_string(),
        not_before: to_utc(&tbs_cert.validity.not_before),
        not_after: to_utc(&tbs_cert.validity.not_after),
        dns_names: extract_certificate_sans(&cert),
        common_name,
        serial_number: tbs_cert.serial.to_string(),
    })
}

fn to_utc(time: &ASN1Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
}

/// Extracts the DNS names of the Subject Alternative Name extension.
///
/// Other name types (IP addresses, e-mail addresses, URIs) are ignored.
fn extract_certificate_sans(cert: &x509_parser::certificate::X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    sans
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXPIRED_SELF_SIGNED: &[u8] = include_bytes!("../../tests/fixtures/expired_self_signed.der");

    #[test]
    fn test_parse_leaf_fields() {
        let leaf = parse_leaf(EXPIRED_SELF_SIGNED).unwrap();

        assert_eq!(leaf.common_name, "squat.test");
        assert_eq!(leaf.dns_names, ["squat.test", "www.squat.test"]);
        assert_eq!(leaf.serial_number, "4242424242");
        assert!(leaf.subject.contains("CN=squat.test"));
        assert!(leaf.issuer.contains("O=Squat Test"));
        assert_eq!(
            leaf.not_before,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            leaf.not_after,
            Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_leaf_rejects_garbage() {
        assert!(parse_leaf(b"not a certificate").is_err());
        assert!(parse_leaf(&[]).is_err());
    }
}
