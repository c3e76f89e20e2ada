use crate::error::{ProtocolError, Result};
use crate::sizing::SizingRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Unit assigned to a freshly reset registration form.
pub const DEFAULT_UNIT: &str = "COPOM SP";

/// Store-assigned identifier of a personnel record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Characters the realtime store refuses inside a key.
    const FORBIDDEN: [char; 6] = ['.', '#', '$', '[', ']', '/'];

    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains(Self::FORBIDDEN) || raw.chars().any(char::is_control) {
            return Err(ProtocolError::InvalidRecordId(raw));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Known gender labels. Anything else stored under `sexo` is kept verbatim
/// on the record but does not map to a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Masculino" => Some(Gender::Masculine),
            "Feminino" => Some(Gender::Feminine),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Masculine => "Masculino",
            Gender::Feminine => "Feminino",
        }
    }
}

/// A record as it sits in the store, without its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "posto_gd", default)]
    pub rank: String,
    #[serde(rename = "re", default)]
    pub service_number: String,
    #[serde(rename = "nome_guerra", default)]
    pub war_name: String,
    #[serde(rename = "opm", default)]
    pub unit: String,
    #[serde(rename = "sexo", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "romaneio", default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingRecord>,
}

impl RawRecord {
    /// New records never carry sizing.
    #[must_use]
    pub fn from_identity(identity: IdentityFields) -> Self {
        let mut raw = Self::default();
        raw.apply_identity(identity);
        raw
    }

    /// Overwrites the identity fields and leaves `sizing` untouched.
    pub fn apply_identity(&mut self, identity: IdentityFields) {
        self.rank = identity.rank;
        self.service_number = identity.service_number;
        self.war_name = identity.war_name;
        self.unit = identity.unit;
        self.gender = identity.gender;
    }
}

/// The full stored collection keyed by record id.
pub type Collection = BTreeMap<RecordId, RawRecord>;

/// The identity part of a record as submitted by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub rank: String,
    pub service_number: String,
    pub war_name: String,
    pub unit: String,
    pub gender: Option<String>,
}

impl IdentityFields {
    /// Trim everything, uppercase the free-text fields, and drop a blank gender.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            rank: self.rank.trim().to_uppercase(),
            service_number: self.service_number.trim().to_string(),
            war_name: self.war_name.trim().to_uppercase(),
            unit: self.unit.trim().to_uppercase(),
            gender: self
                .gender
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
        }
    }
}

/// A roster entry: a stored record together with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub id: RecordId,
    pub rank: String,
    pub service_number: String,
    pub war_name: String,
    pub unit: String,
    pub gender: Option<String>,
    pub sizing: Option<SizingRecord>,
}

impl PersonnelRecord {
    #[must_use]
    pub fn from_raw(id: RecordId, raw: RawRecord) -> Self {
        Self {
            id,
            rank: raw.rank,
            service_number: raw.service_number,
            war_name: raw.war_name,
            unit: raw.unit,
            gender: raw.gender,
            sizing: raw.sizing,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (RecordId, RawRecord) {
        let raw = RawRecord {
            rank: self.rank,
            service_number: self.service_number,
            war_name: self.war_name,
            unit: self.unit,
            gender: self.gender,
            sizing: self.sizing,
        };
        (self.id, raw)
    }

    #[must_use]
    pub fn has_sizing(&self) -> bool {
        self.sizing.is_some()
    }

    #[must_use]
    pub fn gender_kind(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }

    /// Gender as shown to the operator; `N/A` when absent.
    #[must_use]
    pub fn gender_label(&self) -> &str {
        match self.gender.as_deref() {
            Some(g) if !g.is_empty() => g,
            _ => "N/A",
        }
    }

    #[must_use]
    pub fn identity(&self) -> IdentityFields {
        IdentityFields {
            rank: self.rank.clone(),
            service_number: self.service_number.clone(),
            war_name: self.war_name.clone(),
            unit: self.unit.clone(),
            gender: self.gender.clone(),
        }
    }

    /// Roster order: service number as a plain string, id as tie-break so
    /// duplicated numbers in a hand-edited store still sort reproducibly.
    #[must_use]
    pub fn cmp_by_service_number(&self, other: &Self) -> Ordering {
        self.service_number
            .cmp(&other.service_number)
            .then_with(|| self.id.cmp(&other.id))
    }

    /// `<rank> <war name> (RE: <service number>)`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {} (RE: {})",
            self.rank, self.war_name, self.service_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_id_rejects_store_reserved_characters() {
        assert!(RecordId::new("-NxA1b2c3").is_ok());
        for bad in ["", "a/b", "a.b", "a#b", "a$b", "a[b", "a]b"] {
            assert!(RecordId::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn raw_record_uses_store_field_names() {
        let raw: RawRecord = serde_json::from_str(
            r#"{
                "posto_gd": "SD",
                "re": "123456",
                "nome_guerra": "SILVA",
                "opm": "COPOM SP",
                "sexo": "Feminino",
                "romaneio": {"camisa": "40", "calca": "38"}
            }"#,
        )
        .unwrap();
        assert_eq!(raw.rank, "SD");
        assert_eq!(raw.service_number, "123456");
        assert_eq!(raw.gender.as_deref(), Some("Feminino"));
        assert_eq!(raw.sizing.as_ref().unwrap().size(Category::Pants), "38");

        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["nome_guerra"], "SILVA");
        assert_eq!(json["romaneio"]["cinto"], "");
    }

    #[test]
    fn absent_sizing_is_not_serialized() {
        let raw = RawRecord::from_identity(IdentityFields {
            rank: "CB".into(),
            service_number: "000001".into(),
            war_name: "LIMA".into(),
            unit: "1 BPM".into(),
            gender: None,
        });
        let json = serde_json::to_value(&raw).unwrap();
        assert!(json.get("romaneio").is_none());
        assert!(json.get("sexo").is_none());
    }

    #[test]
    fn identity_normalization_trims_and_uppercases() {
        let identity = IdentityFields {
            rank: "  sd pm ".into(),
            service_number: " 123456 ".into(),
            war_name: "souza".into(),
            unit: " copom sp".into(),
            gender: Some("  ".into()),
        }
        .normalized();
        assert_eq!(identity.rank, "SD PM");
        assert_eq!(identity.service_number, "123456");
        assert_eq!(identity.war_name, "SOUZA");
        assert_eq!(identity.unit, "COPOM SP");
        assert_eq!(identity.gender, None);
    }

    #[test]
    fn apply_identity_keeps_sizing() {
        let mut raw = RawRecord {
            sizing: Some(SizingRecord::default().with_size(Category::Shirt, "40")),
            ..RawRecord::default()
        };
        raw.apply_identity(IdentityFields {
            rank: "SGT".into(),
            ..IdentityFields::default()
        });
        assert_eq!(raw.rank, "SGT");
        assert!(raw.sizing.is_some());
    }

    #[test]
    fn service_number_order_is_lexicographic() {
        let make = |id: &str, re: &str| {
            PersonnelRecord::from_raw(
                RecordId::new(id).unwrap(),
                RawRecord {
                    service_number: re.into(),
                    ..RawRecord::default()
                },
            )
        };
        let mut records = vec![make("a", "99"), make("b", "100000"), make("c", "100000")];
        records.sort_by(PersonnelRecord::cmp_by_service_number);
        let order: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn gender_label_falls_back_to_na() {
        let id = RecordId::new("k1").unwrap();
        let mut record = PersonnelRecord::from_raw(id, RawRecord::default());
        assert_eq!(record.gender_label(), "N/A");
        record.gender = Some("Outro".into());
        assert_eq!(record.gender_label(), "Outro");
        assert_eq!(record.gender_kind(), None);
        record.gender = Some("Masculino".into());
        assert_eq!(record.gender_kind(), Some(Gender::Masculine));
    }
}
