//! Counterparty extraction from free-text operation descriptions.
//!
//! An ordered chain of pattern rules built around legal-form marker tokens
//! (ООО, АО, ИП, ПАО). Rules are tried in priority order and the FIRST
//! match wins; later rules are never consulted once an earlier one
//! succeeds.

use regex::Regex;

use crate::error::Result;

/// Legal-form marker alternation shared by the capture rules.
const MARKERS: &str = "ООО|АО|ИП|ПАО";

enum RuleKind {
    /// `"ООО АМД КОМПАНИ"` — marker and name quoted together; the capture
    /// is everything between the marker and the closing quote.
    QuotedName,
    /// `ООО "АТЛАНТИДА"` or `ООО АТЛАНТИДА` — marker followed by an
    /// optionally-quoted name. No closing anchor, so an unquoted name may
    /// over-capture trailing text.
    LooseName,
    /// `"ТВ "АД РУСС" И КО"` — fixed compound form matched as an atomic
    /// literal and returned verbatim. Whenever the text also contains a
    /// marker token, `LooseName` matches first and this rule is shadowed;
    /// it is kept in the chain rather than silently dropped.
    CompoundLiteral,
}

struct PartyRule {
    kind: RuleKind,
    re: Regex,
}

/// Compiled extraction rule chain.
///
/// Two policies exist and are deliberately NOT unified, because files
/// produced under one policy must keep their keys when merged:
/// - [`PartyRules::raw`] matches markers case-SENSITIVELY and returns the
///   trimmed capture as written;
/// - [`PartyRules::canonical`] matches markers case-insensitively (the
///   whole pattern carries the `(?i)` flag) and normalizes the result to
///   `МАРКЕР "Имя"` — marker uppercased, name re-quoted.
pub struct PartyRules {
    rules: Vec<PartyRule>,
    canonical: bool,
}

impl PartyRules {
    /// Case-sensitive rules returning the raw captured name.
    pub fn raw() -> Result<Self> {
        Self::build(false)
    }

    /// Case-insensitive rules returning the normalized `МАРКЕР "Имя"` form.
    pub fn canonical() -> Result<Self> {
        Self::build(true)
    }

    fn build(canonical: bool) -> Result<Self> {
        let flag = if canonical { "(?i)" } else { "" };
        let rules = vec![
            PartyRule {
                kind: RuleKind::QuotedName,
                re: Regex::new(&format!(r#"{flag}"({MARKERS})\s+([^"]+)""#))?,
            },
            PartyRule {
                kind: RuleKind::LooseName,
                re: Regex::new(&format!(r#"{flag}({MARKERS})\s+"?([^"]+)"?"#))?,
            },
            PartyRule {
                kind: RuleKind::CompoundLiteral,
                re: Regex::new(&format!(r#"{flag}"ТВ\s+"[^"]+"\s+И\s+КО""#))?,
            },
        ];
        Ok(Self { rules, canonical })
    }

    /// Extract a counterparty from `text`, or `None` when no rule matches.
    /// Callers treat `None` as "drop the record", not as an error.
    pub fn extract(&self, text: &str) -> Option<String> {
        for rule in &self.rules {
            let Some(caps) = rule.re.captures(text) else {
                continue;
            };
            let extracted = match rule.kind {
                RuleKind::CompoundLiteral => caps[0].to_string(),
                RuleKind::QuotedName | RuleKind::LooseName => {
                    let name = caps[2].trim();
                    if self.canonical {
                        format!("{} \"{}\"", caps[1].to_uppercase(), name)
                    } else {
                        name.to_string()
                    }
                }
            };
            return Some(extracted);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_name_beats_loose_name() {
        // LooseName alone would anchor on `ИП` and capture
        // "Иванов перечислил в"; the quoted rule runs first.
        let rules = PartyRules::raw().unwrap();
        let got = rules.extract("ИП Иванов перечислил в \"ООО РОМАШКА\" оплату");
        assert_eq!(got.as_deref(), Some("РОМАШКА"));
    }

    #[test]
    fn raw_returns_bare_capture() {
        let rules = PartyRules::raw().unwrap();
        assert_eq!(
            rules.extract("Оплата поставщику ООО \"АТЛАНТИДА\" по договору").as_deref(),
            Some("АТЛАНТИДА")
        );
    }

    #[test]
    fn loose_name_may_overcapture_unquoted_tail() {
        let rules = PartyRules::raw().unwrap();
        assert_eq!(
            rules.extract("ООО АТЛАНТИДА по договору 5").as_deref(),
            Some("АТЛАНТИДА по договору 5")
        );
    }

    #[test]
    fn canonical_normalizes_marker_and_requotes() {
        let rules = PartyRules::canonical().unwrap();
        assert_eq!(
            rules.extract("оплата ооо \"АтлантидА\" за услуги").as_deref(),
            Some("ООО \"АтлантидА\"")
        );
    }

    #[test]
    fn raw_markers_are_case_sensitive() {
        let rules = PartyRules::raw().unwrap();
        assert_eq!(rules.extract("оплата ооо ромашка"), None);
    }

    #[test]
    fn no_marker_means_no_match() {
        let rules = PartyRules::raw().unwrap();
        assert_eq!(rules.extract("Оплата по счету 12 от физлица"), None);
        assert_eq!(rules.extract(""), None);
    }

    #[test]
    fn compound_literal_is_returned_verbatim() {
        // No marker token anywhere, so the first two rules pass and the
        // literal rule fires, returning the whole span with its quotes.
        let rules = PartyRules::raw().unwrap();
        assert_eq!(
            rules.extract("реклама на \"ТВ \"АД РУСС\" И КО\" за март").as_deref(),
            Some("\"ТВ \"АД РУСС\" И КО\"")
        );
    }

    #[test]
    fn compound_literal_is_shadowed_when_a_marker_is_present() {
        let rules = PartyRules::raw().unwrap();
        let got = rules.extract("ООО ВЕГА реклама на \"ТВ \"АД РУСС\" И КО\"");
        // LooseName wins; capture runs to the first quote.
        assert_eq!(got.as_deref(), Some("ВЕГА реклама на"));
    }

    #[test]
    fn extraction_never_yields_empty_keys() {
        let rules = PartyRules::canonical().unwrap();
        for text in ["ООО", "ООО ", "ООО \""] {
            assert_eq!(rules.extract(text), None, "text {text:?}");
        }
    }
}
