//! PII redaction for Dutch free text.
//!
//! Detects and replaces personally identifiable information:
//! - Phone numbers (Dutch and international formats, WhatsApp links)
//! - Email addresses
//! - Postal codes (`1234 AB`)
//! - Dates (numeric and Dutch month names)

use serde::Serialize;

use crate::logging::structured::LogContext;

use super::rules::{rules_for, Placeholder, RULES};

/// Redaction counts per placeholder category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedactionStats {
    pub phones_found: usize,
    pub emails_found: usize,
    pub postal_codes_found: usize,
    pub dates_found: usize,
}

impl RedactionStats {
    pub fn total_entities(&self) -> usize {
        self.phones_found + self.emails_found + self.postal_codes_found + self.dates_found
    }

    pub fn record(&mut self, placeholder: Placeholder, count: usize) {
        match placeholder {
            Placeholder::Phone => self.phones_found += count,
            Placeholder::Email => self.emails_found += count,
            Placeholder::PostalCode => self.postal_codes_found += count,
            Placeholder::Date => self.dates_found += count,
        }
    }

    pub fn merge(&mut self, other: &RedactionStats) {
        self.phones_found += other.phones_found;
        self.emails_found += other.emails_found;
        self.postal_codes_found += other.postal_codes_found;
        self.dates_found += other.dates_found;
    }
}

/// Stateless redactor over the shared rule set.
///
/// Holds no per-call state, so a single instance can be shared across
/// threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrivacyFilter;

impl PrivacyFilter {
    pub fn new() -> Self {
        Self
    }

    /// Apply every rule, in order.
    pub fn filter(&self, text: &str) -> String {
        self.filter_with_stats(text).0
    }

    /// Apply every rule, in order, counting replacements per category.
    pub fn filter_with_stats(&self, text: &str) -> (String, RedactionStats) {
        RULES.iter().fold(
            (text.to_string(), RedactionStats::default()),
            |(current, mut stats), rule| {
                let (next, count) = rule.apply(&current);
                stats.record(rule.placeholder, count);
                (next, stats)
            },
        )
    }

    pub fn remove_phone_numbers(&self, text: &str) -> String {
        apply_category(text, Placeholder::Phone)
    }

    pub fn remove_email(&self, text: &str) -> String {
        apply_category(text, Placeholder::Email)
    }

    pub fn remove_postal_codes(&self, text: &str) -> String {
        apply_category(text, Placeholder::PostalCode)
    }

    pub fn remove_dates(&self, text: &str) -> String {
        apply_category(text, Placeholder::Date)
    }

    /// Redact a single table cell, logging what was found.
    pub fn redact(&self, text: &str, ctx: &LogContext) -> (String, RedactionStats) {
        let (redacted, stats) = self.filter_with_stats(text);

        if stats.total_entities() > 0 {
            log::debug!(
                "{} PII_REDACTED phones={} emails={} postal_codes={} dates={}",
                ctx,
                stats.phones_found,
                stats.emails_found,
                stats.postal_codes_found,
                stats.dates_found
            );
        }

        (redacted, stats)
    }
}

fn apply_category(text: &str, placeholder: Placeholder) -> String {
    rules_for(placeholder).fold(text.to_string(), |current, rule| rule.apply(&current).0)
}

/// Redact `text` with the full rule set.
pub fn filter(text: &str) -> String {
    PrivacyFilter::new().filter(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_redaction() {
        let scrubbed = filter("Bel mij op 06-12345678");
        assert!(scrubbed.contains("<PHONE>"));
        assert!(!scrubbed.contains("12345678"));
        assert_eq!(scrubbed, "Bel mij op <PHONE>");
    }

    #[test]
    fn test_parenthesized_phone() {
        assert_eq!(filter("tel (0)6-12345678"), "tel <PHONE>");
        assert_eq!(filter("tel (31)612345678"), "tel <PHONE>");
    }

    #[test]
    fn test_email_redaction() {
        assert_eq!(filter("mail naar jan.jansen@example.nl"), "mail naar <EMAIL>");
        assert_eq!(filter("MAIL: Info@Bedrijf.NL"), "MAIL: <EMAIL>");
    }

    #[test]
    fn test_postal_code_boundary_preserved() {
        assert_eq!(filter("1234 AB, Amsterdam"), "<POSTALCODE>, Amsterdam");
        assert_eq!(filter("Dorpsstraat 1, 1234AB Amsterdam"), "Dorpsstraat 1, <POSTALCODE> Amsterdam");
    }

    #[test]
    fn test_postal_code_without_boundary_is_kept() {
        assert_eq!(filter("1234AB"), "1234AB");
        assert_eq!(filter("postcode 1234 AB"), "postcode 1234 AB");
    }

    #[test]
    fn test_numeric_date() {
        assert_eq!(filter("Geboren op 01-02-1990"), "Geboren op <DATE>");
    }

    #[test]
    fn test_month_name_date() {
        assert_eq!(filter("Afspraak op 5 januari 2024."), "Afspraak op <DATE>.");
        assert_eq!(filter("Afspraak op 5 jan 2024."), "Afspraak op <DATE>.");
    }

    #[test]
    fn test_placeholders_are_stable() {
        let text = "<PHONE> <EMAIL> <POSTALCODE> <DATE>";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_mixed_document() {
        let ctx = LogContext::new("test-job");
        let (scrubbed, stats) = PrivacyFilter::new().redact(
            "Beste, bel 0612345678 of mail p.devries@mail.com. Adres: 4321 XY; datum 14 februari 2023.",
            &ctx,
        );
        assert_eq!(
            scrubbed,
            "Beste, bel <PHONE> of mail <EMAIL>. Adres: <POSTALCODE>; datum <DATE>."
        );
        assert_eq!(stats.phones_found, 1);
        assert_eq!(stats.emails_found, 1);
        assert_eq!(stats.postal_codes_found, 1);
        assert_eq!(stats.dates_found, 1);
        assert_eq!(stats.total_entities(), 4);
    }

    #[test]
    fn test_category_methods() {
        let pf = PrivacyFilter::new();
        let text = "06-12345678 a@b.nl 1234 AB, 01-01-2000";
        assert_eq!(pf.remove_phone_numbers(text), "<PHONE> a@b.nl 1234 AB, 01-01-2000");
        assert_eq!(pf.remove_email(text), "06-12345678 <EMAIL> 1234 AB, 01-01-2000");
        assert_eq!(pf.remove_postal_codes(text), "06-12345678 a@b.nl <POSTALCODE>, 01-01-2000");
    }

    #[test]
    fn test_no_pii() {
        let original = "Dit is een normale tekst zonder persoonsgegevens";
        let (scrubbed, stats) = PrivacyFilter::new().filter_with_stats(original);
        assert_eq!(scrubbed, original);
        assert_eq!(stats.total_entities(), 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = RedactionStats::default();
        let mut one = RedactionStats::default();
        one.record(Placeholder::Email, 2);
        one.record(Placeholder::Date, 1);
        total.merge(&one);
        total.merge(&one);
        assert_eq!(total.emails_found, 4);
        assert_eq!(total.dates_found, 2);
        assert_eq!(total.total_entities(), 6);
    }
}
