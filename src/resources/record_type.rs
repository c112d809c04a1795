use crate::{Error, Result};

use serde::Serialize;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// The record types supported by the aggregator.
///
/// The set is fixed; the numeric codes are the DNS wire type codes used by the
/// `type` field of DoH JSON answers.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    TXT,
}

impl RecordType {
    /// All record types queried for a domain, in presentation order.
    pub fn all() -> [RecordType; 4] {
        [RecordType::A, RecordType::AAAA, RecordType::CNAME, RecordType::TXT]
    }

    /// The numeric DNS type code of this record type.
    pub fn code(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
        }
    }

    #[inline]
    pub fn is_ip_addr(self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA)
    }
}

impl TryFrom<u16> for RecordType {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        match code {
            1 => Ok(RecordType::A),
            5 => Ok(RecordType::CNAME),
            16 => Ok(RecordType::TXT),
            28 => Ok(RecordType::AAAA),
            _ => Err(Error::ParserError {
                what: code.to_string(),
                to: "RecordType",
                why: "unsupported record type code".to_string(),
            }),
        }
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(str: &str) -> Result<Self> {
        match str {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "TXT" => Ok(RecordType::TXT),
            _ => Err(Error::ParserError {
                what: str.to_string(),
                to: "RecordType",
                why: "unsupported record type".to_string(),
            }),
        }
    }
}

impl From<RecordType> for &'static str {
    fn from(rt: RecordType) -> &'static str {
        match rt {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::TXT => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(Into::<&str>::into(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral::prelude::*;

    #[test]
    fn code_table() {
        assert_that(&RecordType::A.code()).is_equal_to(1);
        assert_that(&RecordType::CNAME.code()).is_equal_to(5);
        assert_that(&RecordType::TXT.code()).is_equal_to(16);
        assert_that(&RecordType::AAAA.code()).is_equal_to(28);
    }

    #[test]
    fn code_table_round_trip() {
        for rt in RecordType::all() {
            let code = rt.code();
            assert_that(&RecordType::try_from(code).unwrap()).is_equal_to(rt);
        }
    }

    #[test]
    fn unknown_code_is_err() {
        let res = RecordType::try_from(2); // NS is not part of the fixed set
        assert_that(&res).is_err();
    }

    #[test]
    fn from_str_round_trip() {
        for rt in RecordType::all() {
            let str = rt.to_string();
            assert_that(&RecordType::from_str(&str).unwrap()).is_equal_to(rt);
        }
    }
}
