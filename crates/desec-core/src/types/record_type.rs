use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DesecError;

/// Record types the deSEC API accepts for RRset management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Afsdb,
    Caa,
    Cname,
    Dname,
    Ds,
    Hinfo,
    Https,
    Loc,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Rp,
    Spf,
    Srv,
    Sshfp,
    Svcb,
    Tlsa,
    Txt,
}

impl RecordType {
    /// Every supported type, in alphabetical order
    pub const ALL: [Self; 21] = [
        Self::A,
        Self::Aaaa,
        Self::Afsdb,
        Self::Caa,
        Self::Cname,
        Self::Dname,
        Self::Ds,
        Self::Hinfo,
        Self::Https,
        Self::Loc,
        Self::Mx,
        Self::Naptr,
        Self::Ns,
        Self::Ptr,
        Self::Rp,
        Self::Spf,
        Self::Srv,
        Self::Sshfp,
        Self::Svcb,
        Self::Tlsa,
        Self::Txt,
    ];

    /// Wire name of the type (always uppercase)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Afsdb => "AFSDB",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Dname => "DNAME",
            Self::Ds => "DS",
            Self::Hinfo => "HINFO",
            Self::Https => "HTTPS",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Rp => "RP",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Svcb => "SVCB",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
        }
    }

    /// Returns true if the record data ends in a domain name that must be
    /// fully qualified (trailing dot)
    #[must_use]
    pub const fn is_name_reference(self) -> bool {
        matches!(
            self,
            Self::Cname | Self::Ns | Self::Ptr | Self::Dname | Self::Mx
        )
    }
}

impl FromStr for RecordType {
    type Err = DesecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or(DesecError::UnsupportedType(upper))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("a".parse::<RecordType>().unwrap(), RecordType::A);
        assert_eq!("Cname".parse::<RecordType>().unwrap(), RecordType::Cname);
        assert_eq!("sshfp".parse::<RecordType>().unwrap(), RecordType::Sshfp);
    }

    #[test]
    fn test_unsupported_type() {
        let err = "weird".parse::<RecordType>().unwrap_err();
        assert!(matches!(err, DesecError::UnsupportedType(ref t) if t == "WEIRD"));

        // Types the API manages itself are not accepted either
        assert!("SOA".parse::<RecordType>().is_err());
        assert!("DNSKEY".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_name_reference_class() {
        let refs: Vec<_> = RecordType::ALL
            .into_iter()
            .filter(|t| t.is_name_reference())
            .map(RecordType::as_str)
            .collect();
        assert_eq!(refs, ["CNAME", "DNAME", "MX", "NS", "PTR"]);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&RecordType::Aaaa).unwrap(), "\"AAAA\"");
        for t in RecordType::ALL {
            assert_eq!(t.to_string().parse::<RecordType>().unwrap(), t);
        }
    }
}
