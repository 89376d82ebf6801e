use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for validating slug fields (UMKM slugs)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "keripik-tempe", "warung123", "batik-bu-sri"
    /// - Invalid: "-warung", "warung-", "warung--sari", "Warung", "warung_sari"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for Indonesian phone numbers
    /// - Valid: "081234567890", "+6281234567890", "6281234567890", "0281-123456"
    /// - Invalid: "12345", "phone", "+1 555 0100"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^(?:\+62|62|0)[0-9]{2,4}-?[0-9]{5,10}$").unwrap();

    /// Opening hours in 24h "HH:MM" form
    pub static ref TIME_OF_DAY_REGEX: Regex =
        Regex::new(r"^(?:[01][0-9]|2[0-3])[:.][0-5][0-9]$").unwrap();

    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Rejects strings that are empty after trimming
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("Wajib diisi")));
    }
    Ok(())
}

/// Derive a URL slug from a display name ("Keripik Tempe Bu Sri" -> "keripik-tempe-bu-sri")
pub fn slugify(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Pick a single human-readable message out of a validator error set.
///
/// Fields are visited in name order so the same input always yields the same message.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} tidak valid", field))
            })
        })
        .next()
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("keripik-tempe"));
        assert!(SLUG_REGEX.is_match("warung123"));
        assert!(SLUG_REGEX.is_match("batik-bu-sri"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-warung")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("warung-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("warung--sari")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Warung")); // uppercase
        assert!(!SLUG_REGEX.is_match("warung_sari")); // underscore
        assert!(!SLUG_REGEX.is_match(""));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("081234567890"));
        assert!(PHONE_REGEX.is_match("+6281234567890"));
        assert!(PHONE_REGEX.is_match("0281-123456"));
        assert!(!PHONE_REGEX.is_match("12345"));
        assert!(!PHONE_REGEX.is_match("phone"));
    }

    #[test]
    fn test_time_of_day_regex() {
        assert!(TIME_OF_DAY_REGEX.is_match("08:00"));
        assert!(TIME_OF_DAY_REGEX.is_match("17.30"));
        assert!(!TIME_OF_DAY_REGEX.is_match("24:00"));
        assert!(!TIME_OF_DAY_REGEX.is_match("8:00"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Keripik Tempe Bu Sri"), "keripik-tempe-bu-sri");
        assert_eq!(slugify("  Batik & Tenun!! "), "batik-tenun");
        assert!(SLUG_REGEX.is_match(&slugify("Warung  Makan -- Sari")));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Baturaden").is_ok());
        assert!(not_blank("   ").is_err());
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Judul wajib diisi"))]
        judul: String,
        #[validate(length(min = 1, message = "Deskripsi wajib diisi"))]
        deskripsi: String,
    }

    #[test]
    fn test_first_message_is_deterministic() {
        let sample = Sample {
            judul: String::new(),
            deskripsi: String::new(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(first_message(&errors), "Deskripsi wajib diisi");
    }
}
