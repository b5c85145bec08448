use serde::{Deserialize, Serialize};

/// A contact address rewritten into the exact form the delivery channel
/// expects, e.g. `whatsapp:+919876543210`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    pub value: String,
}

impl NormalizedAddress {
    /// Trims the raw address, prepends the region prefix when no explicit
    /// `+` country code is present, and prefixes the channel scheme.
    pub fn normalize(raw: &str, default_region_prefix: &str, channel_scheme: &str) -> Self {
        let trimmed = raw.trim();
        let number = if trimmed.starts_with('+') {
            trimmed.to_string()
        } else {
            format!("{default_region_prefix}{trimmed}")
        };
        Self {
            value: format!("{channel_scheme}:{number}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_numbers_get_the_region_prefix() {
        let address = NormalizedAddress::normalize("9876543210", "+91", "wa");
        assert_eq!(address.as_str(), "wa:+919876543210");
    }

    #[test]
    fn explicit_country_codes_are_kept() {
        let address = NormalizedAddress::normalize("+19876543210", "+91", "wa");
        assert_eq!(address.as_str(), "wa:+19876543210");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let address = NormalizedAddress::normalize("  9876543210\t", "+91", "whatsapp");
        assert_eq!(address.as_str(), "whatsapp:+919876543210");
    }
}
