// Publisher name rules. A name must be non-empty, start with an ASCII
// letter or digit, and contain only ASCII letters, digits and '-'.

use crate::error::{PublisherError, Result};

pub fn validate_publisher_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PublisherError::Validation(
            "Missing publisher name".into(),
        ));
    }

    let mut chars = name.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !starts_ok || !rest_ok {
        return Err(PublisherError::Validation(format!(
            "Invalid publisher name '{}'. Expected the identifier of a publisher, not its human-friendly name.",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["acme", "Acme-Corp", "a", "0day", "ms-tools-2"] {
            assert!(validate_publisher_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_bad_identifiers() {
        for name in ["", "-acme", "acme corp", "acme_corp", "acmé", "acme.io"] {
            let err = validate_publisher_name(name).unwrap_err();
            assert!(matches!(err, PublisherError::Validation(_)), "{name}");
        }
    }

    #[test]
    fn empty_name_reports_missing() {
        let err = validate_publisher_name("").unwrap_err();
        assert_eq!(err.to_string(), "Missing publisher name");
    }
}
