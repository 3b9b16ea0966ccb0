//! 4-digit status code written to the appliance description
//!
//! Field order is fixed: `wan`, `ipverify`, `lan`, `wifi`. Each digit is `1`
//! for healthy and `0` for anything else.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Health of each subsystem for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthBits {
    pub wan: bool,
    pub ipverify: bool,
    pub lan: bool,
    pub wifi: bool,
}

impl HealthBits {
    /// No client reachable over any local medium
    pub fn no_clients(&self) -> bool {
        !self.lan && !self.wifi
    }

    pub fn encode(&self) -> StatusCode {
        let code = [self.wan, self.ipverify, self.lan, self.wifi]
            .iter()
            .map(|&healthy| if healthy { '1' } else { '0' })
            .collect();
        StatusCode(code)
    }
}

/// Encoded health summary, always four `0`/`1` digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bits(&self) -> HealthBits {
        let digits: Vec<bool> = self.0.chars().map(|c| c == '1').collect();
        HealthBits {
            wan: digits[0],
            ipverify: digits[1],
            lan: digits[2],
            wifi: digits[3],
        }
    }
}

impl From<HealthBits> for StatusCode {
    fn from(bits: HealthBits) -> Self {
        bits.encode()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for StatusCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StatusCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status code {0:?}: expected four 0/1 digits")]
pub struct StatusCodeError(pub String);

impl FromStr for StatusCode {
    type Err = StatusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 4 && s.chars().all(|c| c == '0' || c == '1') {
            Ok(StatusCode(s.to_string()))
        } else {
            Err(StatusCodeError(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_is_wan_ipverify_lan_wifi() {
        let bits = HealthBits {
            wan: true,
            ipverify: false,
            lan: false,
            wifi: true,
        };
        assert_eq!(bits.encode(), "1001");
    }

    #[test]
    fn every_combination_decodes_back() {
        for mask in 0u8..16 {
            let bits = HealthBits {
                wan: mask & 0b1000 != 0,
                ipverify: mask & 0b0100 != 0,
                lan: mask & 0b0010 != 0,
                wifi: mask & 0b0001 != 0,
            };
            let code = bits.encode();
            assert_eq!(code.as_str().len(), 4);
            assert_eq!(code.as_str(), format!("{mask:04b}"));
            assert_eq!(code.bits(), bits);
        }
    }

    #[test]
    fn parse_rejects_anything_but_four_binary_digits() {
        assert!("0110".parse::<StatusCode>().unwrap().bits().lan);
        assert!("011".parse::<StatusCode>().is_err());
        assert!("01101".parse::<StatusCode>().is_err());
        assert!("0 10".parse::<StatusCode>().is_err());
        assert!("WAN:1".parse::<StatusCode>().is_err());
        assert!("".parse::<StatusCode>().is_err());
    }

    #[test]
    fn no_clients_needs_both_local_media_down() {
        let mut bits = HealthBits::default();
        assert!(bits.no_clients());
        bits.wifi = true;
        assert!(!bits.no_clients());
        bits.wifi = false;
        bits.lan = true;
        assert!(!bits.no_clients());
    }
}
