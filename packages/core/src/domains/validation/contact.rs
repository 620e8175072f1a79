//! Email and phone checks.

use lazy_static::lazy_static;
use regex::Regex;

/// Free and disposable webmail providers that do not identify an organization.
pub const PUBLIC_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "yahoo.com",
    "live.com",
    "icloud.com",
    "protonmail.com",
    "mail.com",
    "gmx.com",
    "aol.com",
    "yandex.com",
    "zoho.com",
    "tutanota.com",
    "temp-mail.org",
    "guerrillamail.com",
    "10minutemail.com",
    "mailinator.com",
];

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^(\+34)?[6789][0-9]{8}$").unwrap();
    static ref DEFAULT_PUBLIC_DOMAINS: PublicDomains = PublicDomains::default();
}

/// Deny-list of public email domains consulted by the corporate email check.
///
/// Entries are stored lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDomains {
    domains: Vec<String>,
}

impl PublicDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Add one more domain to the list.
    pub fn with_domain(mut self, domain: impl AsRef<str>) -> Self {
        self.domains.push(domain.as_ref().trim().to_lowercase());
        self
    }

    pub fn contains(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.domains.iter().any(|d| *d == domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for PublicDomains {
    fn default() -> Self {
        Self::new(PUBLIC_EMAIL_DOMAINS)
    }
}

/// Validate the general `local@domain.tld` shape.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input.trim())
}

/// Domain part of a syntactically valid email, lowercased.
pub fn email_domain(input: &str) -> Option<String> {
    if !is_valid_email(input) {
        return None;
    }
    input
        .trim()
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_lowercase())
}

/// Corporate email check against an explicit deny-list.
pub fn is_valid_corporate_email_with(input: &str, public_domains: &PublicDomains) -> bool {
    match email_domain(input) {
        Some(domain) => !public_domains.contains(&domain),
        None => false,
    }
}

/// Corporate email check against [`PUBLIC_EMAIL_DOMAINS`].
pub fn is_valid_corporate_email(input: &str) -> bool {
    is_valid_corporate_email_with(input, &DEFAULT_PUBLIC_DOMAINS)
}

/// Remove the separators people type inside phone numbers.
pub(crate) fn clean_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Validate a Spanish phone number, optionally prefixed with `+34`.
///
/// Optional field: blank input is valid.
pub fn is_valid_phone(input: &str) -> bool {
    if input.trim().is_empty() {
        return true;
    }
    PHONE_REGEX.is_match(&clean_phone(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("user@hospital-xyz.es"));
        assert!(is_valid_email("  user@hospital.es  "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@hospital"));
        assert!(!is_valid_email("user hospital@x.es"));
        assert!(!is_valid_email("user@@x.es"));
        assert!(!is_valid_email("@x.es"));
    }

    #[test]
    fn test_corporate_email_rejects_public_domains() {
        assert!(!is_valid_corporate_email("user@gmail.com"));
        assert!(!is_valid_corporate_email("user@GMAIL.COM"));
        assert!(!is_valid_corporate_email("someone@mailinator.com"));
        assert!(is_valid_corporate_email("user@hospital-xyz.es"));
    }

    #[test]
    fn test_corporate_email_requires_syntax() {
        assert!(!is_valid_corporate_email("not-an-email"));
        assert!(!is_valid_corporate_email(""));
    }

    #[test]
    fn test_custom_deny_list() {
        let domains = PublicDomains::default().with_domain("Correo.es");
        assert_eq!(domains.len(), PUBLIC_EMAIL_DOMAINS.len() + 1);
        assert!(!is_valid_corporate_email_with("a@correo.es", &domains));

        let empty = PublicDomains::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert!(is_valid_corporate_email_with("a@gmail.com", &empty));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("612345678"));
        assert!(is_valid_phone("+34 612 345 678"));
        assert!(is_valid_phone("(91) 234-5678"));
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("   "));
        assert!(!is_valid_phone("512345678"));
        assert!(!is_valid_phone("61234567"));
        assert!(!is_valid_phone("0034612345678"));
    }
}
