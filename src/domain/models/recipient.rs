use serde::{Deserialize, Serialize};

use crate::domain::errors::DispatchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub display_name: String,
    pub contact_address: String,
    pub role: String,
}

impl Recipient {
    /// Roster rows are positional: name, email, phone, role.
    pub fn from_row(row: &[String]) -> Result<Self, DispatchError> {
        if row.len() < 4 {
            return Err(DispatchError::RecordValidation(format!(
                "expected at least 4 fields, got {}",
                row.len()
            )));
        }

        let display_name = row[0].trim();
        let contact_address = row[2].trim();
        let role = row[3].trim();

        if display_name.is_empty() || contact_address.is_empty() || role.is_empty() {
            return Err(DispatchError::RecordValidation(
                "empty name, phone or role".to_string(),
            ));
        }

        Ok(Self {
            display_name: display_name.to_string(),
            contact_address: contact_address.to_string(),
            role: role.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn parses_a_full_row() {
        let recipient =
            Recipient::from_row(&row(&["Asha", "asha@example.com", " 9876543210 ", "student"]))
                .unwrap();
        assert_eq!(recipient.display_name, "Asha");
        assert_eq!(recipient.contact_address, "9876543210");
        assert_eq!(recipient.role, "student");
    }

    #[test]
    fn rejects_short_rows() {
        let err = Recipient::from_row(&row(&["Asha", "asha@example.com", "9876543210"]))
            .unwrap_err();
        assert!(err.to_string().contains("malformed record"));
    }

    #[test]
    fn rejects_blank_phone() {
        let err =
            Recipient::from_row(&row(&["Asha", "asha@example.com", "   ", "student"])).unwrap_err();
        assert!(err.to_string().contains("malformed record"));
    }

    #[test]
    fn rejects_blank_name_and_role() {
        assert!(Recipient::from_row(&row(&["", "a@example.com", "9876543210", "student"])).is_err());
        assert!(Recipient::from_row(&row(&["Asha", "a@example.com", "9876543210", ""])).is_err());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let recipient = Recipient::from_row(&row(&[
            "Asha",
            "asha@example.com",
            "+19876543210",
            "mentor",
            "extra",
        ]))
        .unwrap();
        assert_eq!(recipient.contact_address, "+19876543210");
    }
}
