use crate::cache::RosterCache;
use crate::error::ValidationError;
use regex::Regex;
use romaneio_protocol::{IdentityFields, RecordId};
use std::sync::OnceLock;

fn service_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; `\d` would also accept other Unicode digits.
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("static service number pattern"))
}

/// Exactly six ASCII digits.
pub fn validate_service_number(service_number: &str) -> Result<(), ValidationError> {
    if service_number_pattern().is_match(service_number) {
        Ok(())
    } else {
        Err(ValidationError::MalformedServiceNumber(
            service_number.to_string(),
        ))
    }
}

/// Reject a service number already held by a record other than `editing`.
pub fn check_duplicate(
    service_number: &str,
    editing: Option<&RecordId>,
    cache: &RosterCache,
) -> Result<(), ValidationError> {
    let holder = cache
        .records()
        .iter()
        .find(|r| r.service_number == service_number && Some(&r.id) != editing);
    match holder {
        Some(existing) => Err(ValidationError::DuplicateServiceNumber {
            service_number: service_number.to_string(),
            rank: existing.rank.clone(),
            war_name: existing.war_name.clone(),
        }),
        None => Ok(()),
    }
}

/// Normalize the submitted identity and run both checks against `cache`.
pub fn validate_identity(
    identity: &IdentityFields,
    editing: Option<&RecordId>,
    cache: &RosterCache,
) -> Result<IdentityFields, ValidationError> {
    let identity = identity.normalized();
    validate_service_number(&identity.service_number)?;
    check_duplicate(&identity.service_number, editing, cache)?;
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use romaneio_protocol::{Collection, RawRecord};

    fn cache() -> RosterCache {
        let mut records = Collection::new();
        records.insert(
            RecordId::new("k1").unwrap(),
            RawRecord {
                rank: "SD".into(),
                service_number: "123456".into(),
                war_name: "SILVA".into(),
                ..RawRecord::default()
            },
        );
        RosterCache::from_snapshot(&records)
    }

    #[test]
    fn service_number_must_be_six_ascii_digits() {
        assert!(validate_service_number("000001").is_ok());
        for bad in ["", "12345", "1234567", "12a456", " 123456", "١٢٣٤٥٦"] {
            assert_eq!(
                validate_service_number(bad),
                Err(ValidationError::MalformedServiceNumber(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn duplicate_names_the_current_holder() {
        let err = check_duplicate("123456", None, &cache()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "O RE 123456 já está cadastrado para SD SILVA"
        );
    }

    #[test]
    fn editing_the_holder_is_not_a_duplicate() {
        let id = RecordId::new("k1").unwrap();
        assert!(check_duplicate("123456", Some(&id), &cache()).is_ok());
        let other = RecordId::new("k2").unwrap();
        assert!(check_duplicate("123456", Some(&other), &cache()).is_err());
    }

    #[test]
    fn validate_identity_normalizes_before_checking() {
        let identity = IdentityFields {
            rank: "cb".into(),
            service_number: " 654321 ".into(),
            war_name: "lima".into(),
            unit: "1 bpm".into(),
            gender: Some("Feminino".into()),
        };
        let normalized = validate_identity(&identity, None, &cache()).unwrap();
        assert_eq!(normalized.service_number, "654321");
        assert_eq!(normalized.war_name, "LIMA");
    }
}
