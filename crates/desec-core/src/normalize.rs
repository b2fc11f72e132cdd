//! Record validation and canonicalization.
//!
//! Every value is trimmed and blanks are dropped. Name-reference types
//! (CNAME, NS, PTR, DNAME, MX) get a trailing dot so the API reads them as
//! fully qualified. Nothing here touches the network.

use crate::types::{DocumentKind, RecordDocument, RecordGroup, RecordType, DEFAULT_TTL};
use crate::{DesecError, Result};

/// Canonicalize a single value for `record_type`. Returns `None` for blanks.
#[must_use]
pub fn normalize_value(record_type: RecordType, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if record_type.is_name_reference() && !value.ends_with('.') {
        Some(format!("{value}."))
    } else {
        Some(value.to_string())
    }
}

/// Check that `subname` names exactly one node below the zone apex.
///
/// Labels must be non-empty and free of `/`, otherwise the RRset URL would
/// resolve to a different resource.
pub fn validate_subname(subname: &str) -> Result<()> {
    let reason = if subname.is_empty() {
        "is empty"
    } else if subname.contains('/') {
        "contains '/'"
    } else if subname.split('.').any(str::is_empty) {
        "has an empty label"
    } else {
        return Ok(());
    };

    Err(DesecError::InvalidSubname {
        subname: subname.to_string(),
        reason: reason.to_string(),
    })
}

/// Validate a raw type name and its values into a [`RecordGroup`] for `subname`.
pub fn normalize_group<I, S>(subname: &str, raw_type: &str, values: I) -> Result<RecordGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    validate_subname(subname)?;
    let record_type: RecordType = raw_type.parse()?;

    let records: Vec<String> = values
        .into_iter()
        .filter_map(|v| normalize_value(record_type, v.as_ref()))
        .collect();

    if records.is_empty() {
        return Err(DesecError::EmptyValues {
            subname: subname.to_string(),
            record_type: record_type.to_string(),
        });
    }

    Ok(RecordGroup {
        subname: subname.to_string(),
        record_type,
        records,
        ttl: DEFAULT_TTL,
    })
}

/// Expand a document into its record groups, in document order.
///
/// Fails on the first invalid group, reported as an
/// [`DesecError::InvalidDocument`] naming the document's file.
pub fn normalize_document(doc: &RecordDocument) -> Result<Vec<RecordGroup>> {
    groups_of(doc).map_err(|e| DesecError::InvalidDocument {
        file: doc.file.clone(),
        message: e.to_string(),
    })
}

fn groups_of(doc: &RecordDocument) -> Result<Vec<RecordGroup>> {
    match &doc.kind {
        DocumentKind::NsDelegation(values) => {
            Ok(vec![normalize_group(&doc.subname, RecordType::Ns.as_str(), values)?])
        }
        DocumentKind::TypedRecordMap(groups) => groups
            .iter()
            .map(|(rtype, values)| normalize_group(&doc.subname, rtype, values))
            .collect(),
        DocumentKind::OwnerRecordMap(groups) => groups
            .iter()
            .map(|(rtype, value)| normalize_group(&doc.subname, rtype, [value]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_reference_types_get_trailing_dot() {
        for rtype in ["CNAME", "NS", "PTR", "DNAME", "MX"] {
            let group = normalize_group("www", rtype, ["target.example.com"]).unwrap();
            assert_eq!(group.records, ["target.example.com."], "{rtype}");
        }
    }

    #[test]
    fn test_trailing_dot_is_idempotent() {
        let group = normalize_group("www", "cname", ["target.example.com."]).unwrap();
        assert_eq!(group.records, ["target.example.com."]);

        let again = normalize_group("www", "cname", &group.records).unwrap();
        assert_eq!(again.records, group.records);
    }

    #[test]
    fn test_other_types_never_get_a_dot() {
        for rtype in RecordType::ALL.into_iter().filter(|t| !t.is_name_reference()) {
            let group = normalize_group("x", rtype.as_str(), ["  some-value  "]).unwrap();
            assert_eq!(group.records, ["some-value"], "{rtype}");
        }
    }

    #[test]
    fn test_mx_keeps_priority() {
        let group = normalize_group("mail", "mx", ["10 mx.example.com"]).unwrap();
        assert_eq!(group.records, ["10 mx.example.com."]);
    }

    #[test]
    fn test_blanks_are_dropped() {
        let group = normalize_group("x", "txt", ["", "  ", "\"v=spf1 -all\""]).unwrap();
        assert_eq!(group.records, ["\"v=spf1 -all\""]);
        assert_eq!(group.ttl, 3600);
    }

    #[test]
    fn test_all_blank_is_fatal() {
        let err = normalize_group("x", "a", [" ", ""]).unwrap_err();
        assert!(matches!(
            err,
            DesecError::EmptyValues { ref subname, ref record_type } if subname == "x" && record_type == "A"
        ));
    }

    #[test]
    fn test_unsupported_type_is_fatal() {
        let err = normalize_group("x", "weird", ["1.2.3.4"]).unwrap_err();
        assert!(matches!(err, DesecError::UnsupportedType(ref t) if t == "WEIRD"));
    }

    #[test]
    fn test_owner_document() {
        let doc = RecordDocument::from_json(
            "api.json",
            r#"{"owner":{"username":"api"},"records":{"a":"203.0.113.5"}}"#,
        )
        .unwrap();
        let groups = normalize_document(&doc).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subname, "api");
        assert_eq!(groups[0].record_type, RecordType::A);
        assert_eq!(groups[0].records, ["203.0.113.5"]);
    }

    #[test]
    fn test_ns_delegation_document() {
        let doc = RecordDocument::from_json(
            "sub.json",
            r#"{"subdomain":"sub","record":["ns1.example.com","ns2.example.com."]}"#,
        )
        .unwrap();
        let groups = normalize_document(&doc).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].record_type, RecordType::Ns);
        assert_eq!(groups[0].records, ["ns1.example.com.", "ns2.example.com."]);
    }

    #[test]
    fn test_document_fails_on_first_bad_group() {
        let doc = RecordDocument::from_json(
            "www.json",
            r#"{"subdomain":"www","records":{"cname":"target.example.com","weird":"x"}}"#,
        )
        .unwrap();
        let err = normalize_document(&doc).unwrap_err();
        assert!(matches!(err, DesecError::InvalidDocument { ref file, .. } if file == "www.json"));
        assert!(err.to_string().contains("www.json"));
        assert!(err.to_string().contains("record type \"WEIRD\" is not supported"));
    }

    #[test]
    fn test_dot_subnames_are_rejected() {
        for subname in [".", "..", "a..b", ".www", "www.", "a/b", ""] {
            let err = normalize_group(subname, "a", ["192.0.2.1"]).unwrap_err();
            assert!(
                matches!(err, DesecError::InvalidSubname { subname: ref s, .. } if s == subname),
                "{subname:?}"
            );
        }
    }

    #[test]
    fn test_nested_and_wildcard_subnames_are_accepted() {
        for subname in ["a.b", "*", "_acme-challenge.www"] {
            assert!(validate_subname(subname).is_ok(), "{subname:?}");
        }
    }
}
