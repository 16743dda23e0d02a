//! Receipt document decoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use weighbridge_types::{Error, Receipt};

use crate::envelope::{decode_value, find_string_field};

/// Strip a `data:<mime>;base64,` prefix if present
fn strip_data_url(data: &str) -> &str {
    let data = data.trim();
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

/// Decode the `{"file": "data:application/pdf;base64,..."}` receipt response
pub fn decode_receipt(sale_id: i64, body: &[u8]) -> Result<Receipt, Error> {
    let value = decode_value("receipt", body)?;
    let file = find_string_field(&value, &["file"])
        .ok_or_else(|| Error::Receipt(format!("no file in receipt for sale {}", sale_id)))?;
    let payload: String = strip_data_url(&file)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let pdf = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| Error::Receipt(format!("invalid base64 in receipt for sale {}: {}", sale_id, e)))?;
    Ok(Receipt { sale_id, pdf })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url_receipt() {
        let encoded = STANDARD.encode(b"%PDF-1.7 receipt");
        let body = format!(r#"{{"file":"data:application/pdf;base64,{}"}}"#, encoded);
        let receipt = decode_receipt(12, body.as_bytes()).unwrap();
        assert_eq!(receipt.sale_id, 12);
        assert!(receipt.is_pdf());
    }

    #[test]
    fn test_decode_bare_base64_receipt() {
        let encoded = STANDARD.encode(b"%PDF-1.4");
        let body = format!(r#"{{"results":{{"file":"{}"}}}}"#, encoded);
        assert_eq!(decode_receipt(1, body.as_bytes()).unwrap().pdf, b"%PDF-1.4");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(matches!(decode_receipt(1, b"{}"), Err(Error::Receipt(_))));
    }

    #[test]
    fn test_invalid_base64_is_error() {
        let body = br#"{"file":"data:application/pdf;base64,!!!"}"#;
        assert!(decode_receipt(1, body).is_err());
    }
}
