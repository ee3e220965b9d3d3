// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Per-field masking of flagged values

use serde_json::Value;
use std::borrow::Cow;

use super::config::FieldKind;
use super::detector::{value_text, Classification, FieldMap};

const MASK: char = 'X';
const EMAIL_MASK: char = '*';

pub const REDACTED: &str = "[REDACTED]";
pub const REDACTED_UPI: &str = "[REDACTED_UPI]";
pub const REDACTED_EMAIL: &str = "[REDACTED_EMAIL]";
pub const REDACTED_ADDRESS: &str = "[REDACTED_ADDRESS]";
pub const REDACTED_IP: &str = "[REDACTED_IP]";
pub const REDACTED_DEVICE_ID: &str = "[REDACTED_DEVICE_ID]";

/// Copy `fields` with every flagged key replaced by its masked string
///
/// # Returns
/// The original mapping, borrowed, when the record is not PII
pub fn mask_fields<'a>(
    fields: &'a FieldMap,
    classification: &Classification,
) -> Cow<'a, FieldMap> {
    if !classification.is_pii || classification.flagged.is_empty() {
        return Cow::Borrowed(fields);
    }

    let mut redacted = fields.clone();
    for key in classification.flagged_keys() {
        if let Some(value) = redacted.get_mut(key) {
            let masked = redact(key, value);
            *value = Value::String(masked);
        }
    }

    Cow::Owned(redacted)
}

/// Mask a single value according to its field name
///
/// Total: unknown field names get the generic placeholder.
pub fn redact(field_name: &str, value: &Value) -> String {
    let text = value_text(value);

    match FieldKind::from_key(field_name) {
        Some(FieldKind::Phone | FieldKind::Aadhar) => mask_middle(&text, 2, 2, MASK),
        Some(FieldKind::Passport) => mask_middle(&text, 1, 2, MASK),
        Some(FieldKind::UpiId) => {
            mask_handle(&text, MASK).unwrap_or_else(|| REDACTED_UPI.to_string())
        }
        Some(FieldKind::Name | FieldKind::FirstName | FieldKind::LastName) => mask_name(&text),
        Some(FieldKind::Email) => {
            mask_handle(&text, EMAIL_MASK).unwrap_or_else(|| REDACTED_EMAIL.to_string())
        }
        Some(FieldKind::Address) => REDACTED_ADDRESS.to_string(),
        Some(FieldKind::IpAddress) => REDACTED_IP.to_string(),
        Some(FieldKind::DeviceId) => REDACTED_DEVICE_ID.to_string(),
        None => REDACTED.to_string(),
    }
}

/// Keep `front` leading and `back` trailing characters, mask the rest.
/// Short values keep what they have and mask nothing.
fn mask_middle(value: &str, front: usize, back: usize, mask: char) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();

    let mut out = String::with_capacity(value.len());
    out.extend(&chars[..front.min(len)]);
    out.extend(std::iter::repeat(mask).take(len.saturating_sub(front + back)));
    out.extend(&chars[len.saturating_sub(back)..]);
    out
}

/// `user@domain` -> first two characters of `user`, rest masked, domain verbatim.
/// None unless there is exactly one '@'.
fn mask_handle(value: &str, mask: char) -> Option<String> {
    let mut parts = value.split('@');
    let (user, domain) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(format!("{}@{}", mask_middle(user, 2, 0, mask), domain))
}

/// Keep the initial of every multi-character token
fn mask_name(value: &str) -> String {
    value
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) if !chars.as_str().is_empty() => std::iter::once(first)
                    .chain(chars.map(|_| MASK))
                    .collect::<String>(),
                _ => token.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    #[test]
    fn test_redact_phone_and_aadhar() {
        assert_eq!(redact("phone", &json!("9876543210")), "98XXXXXX10");
        assert_eq!(redact("aadhar", &json!("123456789012")), "12XXXXXXXX12");
    }

    #[test]
    fn test_redact_short_values_clamp() {
        assert_eq!(redact("phone", &json!("1234")), "1234");
        assert_eq!(redact("phone", &json!("123")), "1223");
        assert_eq!(redact("phone", &json!("")), "");
        assert_eq!(redact("passport", &json!("AB")), "AAB");
        assert_eq!(redact("passport", &json!("")), "");
    }

    #[test]
    fn test_redact_passport() {
        assert_eq!(redact("passport", &json!("P1234567")), "PXXXXX67");
    }

    #[test]
    fn test_redact_upi() {
        assert_eq!(redact("upi_id", &json!("rahul.k@ybl")), "raXXXXX@ybl");
        assert_eq!(redact("upi_id", &json!("a@ybl")), "a@ybl");
        assert_eq!(redact("upi_id", &json!("no-at-sign")), REDACTED_UPI);
        assert_eq!(redact("upi_id", &json!("a@b@c")), REDACTED_UPI);
    }

    #[test]
    fn test_redact_email_uses_asterisks() {
        assert_eq!(
            redact("email", &json!("john.doe@example.com")),
            "jo******@example.com"
        );
        assert_eq!(redact("email", &json!("not-an-email")), REDACTED_EMAIL);
    }

    #[test]
    fn test_redact_names() {
        assert_eq!(redact("name", &json!("John Smith")), "JXXX SXXXX");
        assert_eq!(redact("first_name", &json!("A")), "A");
        assert_eq!(redact("last_name", &json!("van  der   Berg")), "vXX dXX BXXX");
        assert_eq!(redact("name", &json!("Élodie Ñ")), "ÉXXXXX Ñ");
    }

    #[test]
    fn test_redact_placeholders() {
        assert_eq!(redact("address", &json!("12 MG Road")), REDACTED_ADDRESS);
        assert_eq!(redact("ip_address", &json!("10.0.0.1")), REDACTED_IP);
        assert_eq!(redact("device_id", &json!("DEV-1")), REDACTED_DEVICE_ID);
        assert_eq!(redact("ssn", &json!("123-45-6789")), REDACTED);
    }

    #[test]
    fn test_redact_coerces_non_strings() {
        assert_eq!(redact("phone", &json!(9876543210u64)), "98XXXXXX10");
        assert_eq!(redact("name", &json!(null)), "nXXX");
    }

    #[test]
    fn test_redact_is_stable_on_masked_phone() {
        let once = redact("phone", &json!("9876543210"));
        let twice = redact("phone", &json!(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_fields_not_pii_borrows() {
        let fields = json!({"email": "a@b.com"}).as_object().cloned().unwrap();
        let result = mask_fields(&fields, &Classification::default());
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_mask_fields_only_touches_flagged() {
        let fields = json!({"phone": "9876543210", "name": "Jane Doe", "qty": 2})
            .as_object()
            .cloned()
            .unwrap();
        let classification = Classification {
            flagged: BTreeSet::from([FieldKind::Phone]),
            signals: BTreeSet::new(),
            is_pii: true,
        };

        let result = mask_fields(&fields, &classification);

        assert_eq!(result["phone"], "98XXXXXX10");
        assert_eq!(result["name"], "Jane Doe");
        assert_eq!(result["qty"], 2);
        // Original is untouched
        assert_eq!(fields["phone"], "9876543210");
    }
}
