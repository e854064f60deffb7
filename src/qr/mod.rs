//! UPI payment URI construction and QR image retrieval.
//!
//! The QR itself is rendered by an external image service. The fetch is
//! bounded by a timeout and treated as best-effort: the invoice is a
//! legal document with or without the QR, so callers should prefer
//! [`fetch_payment_qr`], which degrades to `None` instead of failing.

use std::fmt;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::warn;

use crate::core::round_half_up;

const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_PIXELS: u32 = 180;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Error from the QR rendering service.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum QrError {
    /// Network, TLS, or timeout error.
    Network(String),
    /// The service answered with a non-success status.
    Api(String),
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "QR service network error: {e}"),
            Self::Api(e) => write!(f, "QR service error: {e}"),
        }
    }
}

impl std::error::Error for QrError {}

/// Build a UPI payment URI:
/// `upi://pay?pa=<vpa>&pn=<payee>&am=<amount>&cu=INR&tn=<note>`.
///
/// The payee name and note are percent-encoded; the amount is the
/// half-up-rounded 2-decimal value.
///
/// ```
/// use gstbill::qr::upi_uri;
/// use rust_decimal_macros::dec;
///
/// let uri = upi_uri("packwell@ybl", "Packwell Traders", dec!(2950), "RB/24-25/0001");
/// assert_eq!(
///     uri,
///     "upi://pay?pa=packwell@ybl&pn=Packwell%20Traders&am=2950.00&cu=INR&tn=RB%2F24-25%2F0001"
/// );
/// ```
pub fn upi_uri(upi_id: &str, payee_name: &str, amount: Decimal, note: &str) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={:.2}&cu=INR&tn={}",
        upi_id,
        percent_encode(payee_name),
        round_half_up(amount, 2),
        percent_encode(note)
    )
}

/// Fetch a QR PNG for `uri` from the external rendering service.
///
/// This function is async, requires network access, and is bounded by a
/// 10 second timeout.
///
/// # Errors
///
/// [`QrError::Network`] on connection issues or timeout, [`QrError::Api`]
/// on a non-success HTTP status.
pub async fn fetch_qr_png(uri: &str) -> Result<Vec<u8>, QrError> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| QrError::Network(e.to_string()))?;

    let url = format!(
        "{QR_SERVICE_URL}?size={QR_PIXELS}x{QR_PIXELS}&data={}",
        percent_encode(uri)
    );

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| QrError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(QrError::Api(format!("HTTP {status}")));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| QrError::Network(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Best-effort payment QR for an invoice: any failure is logged and
/// yields `None` so document assembly proceeds without the image.
pub async fn fetch_payment_qr(
    upi_id: &str,
    payee_name: &str,
    amount: Decimal,
    reference: &str,
) -> Option<Vec<u8>> {
    let uri = upi_uri(upi_id, payee_name, amount, reference);
    match fetch_qr_png(&uri).await {
        Ok(png) => Some(png),
        Err(e) => {
            warn!(error = %e, reference, "payment QR unavailable, producing invoice without it");
            None
        }
    }
}

/// Percent-encode everything outside the URI unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn service_url_is_https() {
        assert!(QR_SERVICE_URL.starts_with("https://"));
    }

    #[test]
    fn uri_carries_fixed_currency_and_rounded_amount() {
        let uri = upi_uri("vendor@okaxis", "Acme Supplies", dec!(1234.567), "INV-1");
        assert!(uri.starts_with("upi://pay?pa=vendor@okaxis"));
        assert!(uri.contains("&am=1234.57&"));
        assert!(uri.contains("&cu=INR&"));
    }

    #[test]
    fn amount_always_two_decimals() {
        let uri = upi_uri("v@ybl", "V", dec!(100), "x");
        assert!(uri.contains("&am=100.00&"));
    }

    #[test]
    fn free_text_fields_are_encoded() {
        let uri = upi_uri("v@ybl", "Sharma & Sons", dec!(10), "Invoice #7");
        assert!(uri.contains("pn=Sharma%20%26%20Sons"));
        assert!(uri.contains("tn=Invoice%20%237"));
    }

    #[test]
    fn percent_encode_leaves_unreserved() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(percent_encode("a b"), "a%20b");
    }
}
