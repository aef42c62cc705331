//! The ordered redaction rule set.
//!
//! Every rule pairs a compiled pattern with a replacement template and the
//! placeholder it emits. [`RULES`] lists them in application order:
//! phone numbers, emails, postal codes, dates. The filter folds a document
//! through this list, so the order here is the order of redaction.

use std::fmt;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Category marker substituted for redacted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Phone,
    Email,
    PostalCode,
    Date,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Phone,
        Placeholder::Email,
        Placeholder::PostalCode,
        Placeholder::Date,
    ];

    /// Literal token written into the text.
    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::Phone => "<PHONE>",
            Placeholder::Email => "<EMAIL>",
            Placeholder::PostalCode => "<POSTALCODE>",
            Placeholder::Date => "<DATE>",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Extra condition a candidate match must satisfy before it is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Reject matches that end inside a `<...>` tag, i.e. where the next
    /// angle bracket after the match is a closing one. A rejected match is
    /// retried shorter from the same start before the scan moves on.
    OutsideTag,
}

impl Guard {
    fn permits(self, haystack: &str, match_end: usize) -> bool {
        match self {
            Guard::Always => true,
            Guard::OutsideTag => !inside_tag(&haystack[match_end..]),
        }
    }
}

/// True when `rest` reaches a `>` before any `<`.
fn inside_tag(rest: &str) -> bool {
    rest.find(|c: char| c == '<' || c == '>')
        .map_or(false, |i| rest[i..].starts_with('>'))
}

/// A single (pattern, replacement) pair.
#[derive(Debug)]
pub struct RedactionRule {
    pub name: &'static str,
    pub placeholder: Placeholder,
    pub pattern: Regex,
    /// Expanded with [`Captures::expand`], so `${1}` / `${tail}` re-insert
    /// captured boundary characters.
    pub template: &'static str,
    pub guard: Guard,
    /// `pattern` pinned to the start of the haystack, used to re-match a
    /// guarded candidate from the same position.
    anchored: Regex,
}

impl RedactionRule {
    fn new(
        name: &'static str,
        placeholder: Placeholder,
        pattern: &str,
        template: &'static str,
        guard: Guard,
    ) -> Self {
        Self {
            name,
            placeholder,
            pattern: Regex::new(pattern).unwrap(),
            template,
            guard,
            anchored: Regex::new(&format!(r"\A(?:{})", pattern)).unwrap(),
        }
    }

    /// Replace every permitted match in `text`.
    ///
    /// Returns the rewritten text and the number of replacements made.
    pub fn apply(&self, text: &str) -> (String, usize) {
        match self.guard {
            Guard::Always => {
                let mut count = 0;
                let replaced = self.pattern.replace_all(text, |caps: &Captures<'_>| {
                    count += 1;
                    let mut out = String::with_capacity(self.template.len() + 1);
                    caps.expand(self.template, &mut out);
                    out
                });
                (replaced.into_owned(), count)
            }
            Guard::OutsideTag => self.apply_guarded(text),
        }
    }

    /// Left-to-right scan for guarded rules.
    ///
    /// A start position whose candidates are all rejected is skipped by a
    /// single character, so a match may still begin inside it.
    fn apply_guarded(&self, text: &str) -> (String, usize) {
        let mut out = String::with_capacity(text.len());
        let mut count = 0;
        let mut copied = 0;
        let mut pos = 0;

        while let Some(found) = self.pattern.find_at(text, pos) {
            let start = found.start();
            match self.permitted_at(text, start) {
                Some((end, replacement)) => {
                    out.push_str(&text[copied..start]);
                    out.push_str(&replacement);
                    copied = end;
                    pos = end;
                    count += 1;
                }
                None => {
                    pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        out.push_str(&text[copied..]);
        (out, count)
    }

    /// Longest permitted match beginning exactly at `start`, with its
    /// expanded replacement.
    ///
    /// A rejected candidate is matched again on a haystack cut just before
    /// its last character. Each retry drops the year or shortens the tail,
    /// until the guard passes or nothing matches at `start`.
    fn permitted_at(&self, text: &str, start: usize) -> Option<(usize, String)> {
        let mut limit = text.len();
        while let Some(caps) = self.anchored.captures(&text[start..limit]) {
            let candidate = caps.get(0)?;
            let end = start + candidate.end();
            if self.guard.permits(text, end) {
                let mut replacement = String::with_capacity(self.template.len() + 1);
                caps.expand(self.template, &mut replacement);
                return Some((end, replacement));
            }
            let last = candidate.as_str().chars().next_back()?;
            limit = end - last.len_utf8();
        }
        None
    }
}

const FULL_MONTHS: &str =
    "januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december";

const SHORT_MONTHS: &str = "jan|feb|mrt|apr|mei|jun|jul|aug|sep|okt|nov|dec";

fn month_date_pattern(months: &str) -> String {
    format!(
        r"\d{{1,2}}\W{{0,2}}(?:{})(?:[- /.]{{0,2}}(?:\d{{4}}|\d{{2}}))?(?P<tail>\D)",
        months
    )
}

lazy_static! {
    /// All redaction rules in application order.
    pub static ref RULES: Vec<RedactionRule> = vec![
        // +31 6 1234 5678
        RedactionRule::new(
            "phone_international",
            Placeholder::Phone,
            r"\+\d{1,3}[- ]?\d{1,4}[- ]?\d{1,4}[- ]?\d{1,4}",
            "<PHONE>",
            Guard::Always,
        ),
        // (0)6-12345678
        RedactionRule::new(
            "phone_leading_zero",
            Placeholder::Phone,
            r"\(?0\)?\d[- ]?\d{8}",
            "<PHONE>",
            Guard::Always,
        ),
        // (31)612345678
        RedactionRule::new(
            "phone_country_code",
            Placeholder::Phone,
            r"\(?31\)?\d{9}",
            "<PHONE>",
            Guard::Always,
        ),
        // 06-12345678
        RedactionRule::new(
            "phone_area_code",
            Placeholder::Phone,
            r"\d{2}[- ]?\d{8}",
            "<PHONE>",
            Guard::Always,
        ),
        RedactionRule::new(
            "phone_whatsapp_link",
            Placeholder::Phone,
            r"https://wa\.me/\d+",
            "<PHONE>",
            Guard::Always,
        ),
        RedactionRule::new(
            "email",
            Placeholder::Email,
            r"(?i)[\w.-]+@[\w.-]+\.[a-z]{2,6}",
            "<EMAIL>",
            Guard::Always,
        ),
        // 1234 AB followed by a boundary character, which is kept.
        RedactionRule::new(
            "postal_code",
            Placeholder::PostalCode,
            r"[0-9]{4} ?[A-Z]{2}([ ,.:;])",
            "<POSTALCODE>${1}",
            Guard::Always,
        ),
        // 01-02-1990, 01/02/90; both separators must agree.
        RedactionRule::new(
            "date_numeric",
            Placeholder::Date,
            r"\d{2}-\d{2}-\d{0,4}|\d{2} \d{2} \d{0,4}|\d{2}/\d{2}/\d{0,4}|\d{2}\.\d{2}\.\d{0,4}",
            "<DATE>",
            Guard::Always,
        ),
        RedactionRule::new(
            "date_month_name",
            Placeholder::Date,
            &month_date_pattern(FULL_MONTHS),
            "<DATE>${tail}",
            Guard::OutsideTag,
        ),
        RedactionRule::new(
            "date_month_abbreviation",
            Placeholder::Date,
            &month_date_pattern(SHORT_MONTHS),
            "<DATE>${tail}",
            Guard::OutsideTag,
        ),
    ];
}

/// Rules emitting the given placeholder, in application order.
pub fn rules_for(placeholder: Placeholder) -> impl Iterator<Item = &'static RedactionRule> {
    RULES.iter().filter(move |rule| rule.placeholder == placeholder)
}
