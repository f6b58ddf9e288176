//! Human-readable descriptions for outcome status codes.
//!
//! Outcome records carry a machine code in `category.code`; the service
//! documents a fixed set of them.

const OUTCOMES: &[(&str, &str)] = &[
    ("awaiting-court-result", "Awaiting court outcome"),
    ("court-result-unavailable", "Court result unavailable"),
    ("unable-to-proceed", "Court case unable to proceed"),
    ("local-resolution", "Local resolution"),
    ("no-further-action", "Investigation complete; no suspect identified"),
    ("deprived-of-property", "Offender deprived of property"),
    ("fined", "Offender fined"),
    ("absolute-discharge", "Offender given absolute discharge"),
    ("cautioned", "Offender given a caution"),
    ("drugs-possession-warning", "Offender given a drugs possession warning"),
    ("penalty-notice-issued", "Offender given a penalty notice"),
    ("community-penalty", "Offender given community sentence"),
    ("conditional-discharge", "Offender given conditional discharge"),
    ("suspended-sentence", "Offender given suspended prison sentence"),
    ("imprisoned", "Offender sent to prison"),
    ("other-court-disposal", "Offender otherwise dealt with"),
    ("compensation", "Offender ordered to pay compensation"),
    ("sentenced-in-another-case", "Suspect charged as part of another case"),
    ("charged", "Suspect charged"),
    ("not-guilty", "Defendant found not guilty"),
    ("sent-to-crown-court", "Defendant sent to Crown Court"),
    ("unable-to-prosecute", "Unable to prosecute suspect"),
    ("formal-action-not-in-public-interest", "Formal action is not in the public interest"),
    ("action-taken-by-another-organisation", "Action to be taken by another organisation"),
    (
        "further-investigation-not-in-public-interest",
        "Further investigation is not in the public interest",
    ),
    ("further-action-not-in-public-interest", "Further action is not in the public interest"),
    ("under-investigation", "Under investigation"),
    ("status-update-unavailable", "Status update unavailable"),
];

/// Description for an outcome code, if the code is known.
pub fn outcome_description(code: &str) -> Option<&'static str> {
    OUTCOMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

/// All known `(code, description)` pairs.
pub fn outcome_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    OUTCOMES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(outcome_description("under-investigation"), Some("Under investigation"));
        assert_eq!(outcome_description("charged"), Some("Suspect charged"));
        assert_eq!(outcome_description("no-such-outcome"), None);
    }

    #[test]
    fn catalogue_has_unique_codes() {
        let mut codes: Vec<_> = outcome_codes().map(|(code, _)| code).collect();
        assert_eq!(codes.len(), 28);
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 28);
    }
}
