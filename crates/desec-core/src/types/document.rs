use serde::Deserialize;
use serde_json::{Map, Value};

use crate::normalize::validate_subname;
use crate::{DesecError, Result};

/// One parsed record-definition file.
///
/// The shape of the JSON is decided once, here, and carried as a
/// [`DocumentKind`] so later stages never sniff fields again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDocument {
    /// Where the document was read from (used in error messages)
    pub file: String,

    /// Lowercased, trimmed label relative to the zone apex
    pub subname: String,

    /// Records the document declares
    pub kind: DocumentKind,
}

/// The three document shapes accepted in the records directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// `{ "subdomain": "sub", "record": ["ns1.example.com", ...] }`
    NsDelegation(Vec<String>),

    /// `{ "subdomain": "www", "records": { "cname": "target" | ["..."] } }`
    TypedRecordMap(Vec<(String, Vec<String>)>),

    /// `{ "owner": { "username": "api" }, "records": { "a": "203.0.113.5" } }`
    OwnerRecordMap(Vec<(String, String)>),
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    owner: Option<RawOwner>,
    #[serde(default)]
    subdomain: Option<String>,
    #[serde(default)]
    record: Option<Vec<String>>,
    #[serde(default)]
    records: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    username: String,
}

impl RecordDocument {
    /// Parse a document from its JSON text. `file` only labels errors.
    pub fn from_json(file: &str, text: &str) -> Result<Self> {
        let invalid = |message: String| DesecError::InvalidDocument {
            file: file.to_string(),
            message,
        };

        let raw: RawDocument = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;

        let (subname, kind) = match (raw.record, raw.records) {
            (Some(_), Some(_)) => {
                return Err(invalid(
                    "document has both \"record\" and \"records\"; use one".to_string(),
                ))
            }
            (None, None) => {
                return Err(invalid(
                    "missing \"records\" object or \"record\" list".to_string(),
                ))
            }
            (Some(ns), None) => {
                let subdomain = raw
                    .subdomain
                    .ok_or_else(|| invalid("NS delegation requires \"subdomain\"".to_string()))?;
                (subdomain, DocumentKind::NsDelegation(ns))
            }
            (None, Some(records)) => {
                if let Some(subdomain) = raw.subdomain {
                    (subdomain, DocumentKind::TypedRecordMap(typed_map(records).map_err(invalid)?))
                } else if let Some(owner) = raw.owner {
                    (owner.username, DocumentKind::OwnerRecordMap(owner_map(records).map_err(invalid)?))
                } else {
                    return Err(invalid(
                        "missing \"subdomain\" or \"owner.username\"".to_string(),
                    ));
                }
            }
        };

        let subname = subname.trim().to_lowercase();
        if subname.is_empty() {
            return Err(invalid("subname is empty".to_string()));
        }
        validate_subname(&subname).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            file: file.to_string(),
            subname,
            kind,
        })
    }
}

fn typed_map(records: Map<String, Value>) -> std::result::Result<Vec<(String, Vec<String>)>, String> {
    records
        .into_iter()
        .map(|(rtype, value)| match value {
            Value::String(s) => Ok((rtype, vec![s])),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(format!("{rtype}: expected string value, got {other}")),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(|values| (rtype, values)),
            other => Err(format!("{rtype}: expected string or list of strings, got {other}")),
        })
        .collect()
}

fn owner_map(records: Map<String, Value>) -> std::result::Result<Vec<(String, String)>, String> {
    records
        .into_iter()
        .map(|(rtype, value)| match value {
            Value::String(s) => Ok((rtype, s)),
            other => Err(format!("{rtype}: expected a single string value, got {other}")),
        })
        .collect()
}
