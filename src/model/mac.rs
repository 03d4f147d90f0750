use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Separators must be uniform: either all ':' or all '-'.
static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}$")
        .expect("MAC address regex is valid")
});

static HOSTNAME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("hostname label regex is valid")
});

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address '{0}'")]
pub struct InvalidMac(pub String);

impl MacAddress {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = InvalidMac;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !MAC_RE.is_match(s) {
            return Err(InvalidMac(s.to_string()));
        }
        let mut octets = [0u8; 6];
        for (octet, pair) in octets.iter_mut().zip(s.split([':', '-'])) {
            *octet = u8::from_str_radix(pair, 16).map_err(|_| InvalidMac(s.to_string()))?;
        }
        Ok(Self(octets))
    }
}

/// Canonical form: upper-case pairs joined by ':'.
impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// RFC 1123 host name check, the same rule the server applies to host names.
pub fn is_valid_hostname(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }
    name.split('.').all(|label| HOSTNAME_LABEL_RE.is_match(label))
}
