//! Rule-based field extraction
//!
//! Each field has a short list of labeled patterns tried from most to least
//! specific. The first alternative that matches decides the field. Lower
//! recall than the model extractor, but it needs nothing external and
//! cannot fail.

use async_trait::async_trait;
use regex::Regex;

use crate::model::{
    AssetDetails, ExtractedFields, IncidentInformation, InvolvedParties, PolicyInformation,
};
use crate::service::extraction::{ExternalExtractionFailure, ExtractionStrategy};

// Pattern fragments. None of them crosses a line break, so a label with no
// value never picks up the next line.

/// Label/value separator: a colon or `#` with optional blanks, or blanks alone
macro_rules! sep {
    () => {
        r"(?:[ \t]*[:#][ \t]*|[ \t]+)"
    };
}

/// Person name up to the end of the line
macro_rules! name {
    () => {
        r"([A-Za-z \t.'-]+?)"
    };
}

/// Numeric date such as `12/15/2023` or `3-4-24`
macro_rules! date {
    () => {
        r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    };
}

/// Clock time with optional AM/PM
macro_rules! time {
    () => {
        r"(\d{1,2}:\d{2}(?:[ \t]*[AP]M)?)"
    };
}

/// Currency amount: optional symbol, digits with thousands separators, optional decimals
macro_rules! amount {
    () => {
        r"([$€£]?[ \t]*[\d,]+(?:\.\d+)?)"
    };
}

/// List entries that mean "nothing here"
const EMPTY_LIST_MARKERS: &[&str] = &["none", "n/a", "na", "-", "nil"];

/// Pattern-based FNOL field extractor
pub struct PatternExtractor {
    policy_number: Vec<Regex>,
    policyholder_name: Vec<Regex>,
    effective_dates: Vec<Regex>,
    incident_date: Vec<Regex>,
    incident_time: Vec<Regex>,
    location: Vec<Regex>,
    description: Vec<Regex>,
    claimant: Vec<Regex>,
    third_parties: Vec<Regex>,
    contact_details: Vec<Regex>,
    asset_type: Vec<Regex>,
    asset_id: Vec<Regex>,
    estimated_damage: Vec<Regex>,
    claim_type: Vec<Regex>,
    attachments: Vec<Regex>,
    initial_estimate: Vec<Regex>,
    /// A line that opens a new `Label:` section
    label_line: Regex,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            policy_number: compile(&[
                concat!(r"Policy[ \t]*(?:Number|#|No\.?)", sep!(), r"([A-Z0-9-]+)"),
                r"\bPolicy[ \t]*[:#][ \t]*([A-Z0-9-]+)",
            ]),
            policyholder_name: compile(&[
                concat!(r"Policyholder[ \t]*Name", sep!(), name!(), r"(?:[\r\n]|,|Policy|$)"),
                concat!(r"Policyholder", sep!(), name!(), r"(?:[\r\n]|,|Policy|$)"),
                concat!(r"Insured[ \t]*Name", sep!(), name!(), r"(?:[\r\n]|,|$)"),
                concat!(r"\bInsured", sep!(), name!(), r"(?:[\r\n]|,|$)"),
            ]),
            effective_dates: compile(&[
                concat!(r"Effective[ \t]*Dates?", sep!(), r"([^\n]+)"),
                concat!(r"(?:Policy|Coverage)[ \t]*Period", sep!(), r"([^\n]+)"),
            ]),
            incident_date: compile(&[
                concat!(r"(?:Incident|Loss|Accident)[ \t]*Date", sep!(), date!()),
                concat!(r"Date[ \t]*of[ \t]*(?:Incident|Loss|Accident)", sep!(), date!()),
                concat!(r"\b", date!(), r"\b"),
            ]),
            incident_time: compile(&[
                concat!(r"(?:Incident|Loss|Accident)[ \t]*Time", sep!(), time!()),
                concat!(r"\bTime", sep!(), time!()),
            ]),
            location: compile(&[
                concat!(r"(?:Incident|Accident|Loss)[ \t]*Location", sep!(), r"([^\n]+)"),
                concat!(r"\bLocation", sep!(), r"([^\n]+)"),
            ]),
            description: compile(&[
                concat!(r"Incident[ \t]*Description", sep!(), r"([^\n]+)"),
                concat!(
                    r"Description[ \t]*of[ \t]*(?:Incident|Loss|Accident)",
                    sep!(),
                    r"([^\n]+)"
                ),
                concat!(r"\bDescription", sep!(), r"([^\n]+)"),
            ]),
            claimant: compile(&[
                concat!(r"Claimant[ \t]*Name", sep!(), name!(), r"(?:[\r\n]|,|$)"),
                concat!(r"\bClaimant", sep!(), name!(), r"(?:[\r\n]|,|$)"),
            ]),
            third_parties: compile(&[
                concat!(r"Third[ \t]*Part(?:y|ies)(?:[ \t]*Involved)?", sep!(), r"([^\n]+)"),
                concat!(r"Other[ \t]*Part(?:y|ies)(?:[ \t]*Involved)?", sep!(), r"([^\n]+)"),
            ]),
            contact_details: compile(&[
                concat!(r"Contact[ \t]*Details", sep!(), r"([^\n]+)"),
                concat!(r"\bContact", sep!(), r"([^\n]+)"),
                concat!(r"\bPhone", sep!(), r"([^\n]+)"),
                concat!(r"\bEmail", sep!(), r"([^\n]+)"),
            ]),
            asset_type: compile(&[
                concat!(r"Asset[ \t]*Type", sep!(), r"([^\n]+)"),
                concat!(r"Vehicle[ \t]*Type", sep!(), r"([^\n]+)"),
                concat!(r"Property[ \t]*Type", sep!(), r"([^\n]+)"),
            ]),
            asset_id: compile(&[
                concat!(r"\b(?:VIN|Vehicle[ \t]*ID)", sep!(), r"([A-Z0-9]+)"),
                concat!(r"License[ \t]*Plate", sep!(), r"([A-Z0-9-]+)"),
                concat!(r"Asset[ \t]*ID", sep!(), r"([A-Z0-9-]+)"),
            ]),
            estimated_damage: compile(&[
                concat!(r"Estimated[ \t]*Damage(?:[ \t]*Amount)?", sep!(), amount!()),
                concat!(r"\bDamage(?:[ \t]*Amount)?", sep!(), amount!()),
                concat!(r"Loss[ \t]*Amount", sep!(), amount!()),
            ]),
            claim_type: compile(&[
                concat!(r"Claim[ \t]*Type", sep!(), r"([A-Za-z]+)"),
                concat!(r"Type[ \t]*of[ \t]*Claim", sep!(), r"([A-Za-z]+)"),
            ]),
            attachments: compile(&[
                concat!(r"\bAttachments?", sep!(), r"([^\n]+)"),
                concat!(
                    r"(?:Documents[ \t]*Attached|Supporting[ \t]*Documents)",
                    sep!(),
                    r"([^\n]+)"
                ),
            ]),
            initial_estimate: compile(&[
                concat!(r"Initial[ \t]*Estimate", sep!(), amount!()),
                concat!(r"Repair[ \t]*Estimate", sep!(), amount!()),
            ]),
            label_line: Regex::new(
                r"^[A-Za-z][\w/#&().'-]*(?:[ \t]+[A-Za-z][\w/#&().'-]*){0,4}[ \t]*:",
            )
            .unwrap(),
        }
    }

    /// Extract every field the patterns can find; absent fields stay `None`
    pub fn extract_fields(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            policy_information: PolicyInformation {
                policy_number: first_text(&self.policy_number, text),
                policyholder_name: first_text(&self.policyholder_name, text),
                effective_dates: first_text(&self.effective_dates, text),
            },
            incident_information: IncidentInformation {
                date: first_text(&self.incident_date, text),
                time: first_text(&self.incident_time, text),
                location: first_text(&self.location, text),
                description: self.description(text),
            },
            involved_parties: InvolvedParties {
                claimant: first_text(&self.claimant, text),
                third_parties: first_list(&self.third_parties, text),
                contact_details: first_text(&self.contact_details, text),
            },
            asset_details: AssetDetails {
                asset_type: first_text(&self.asset_type, text),
                asset_id: first_text(&self.asset_id, text),
                estimated_damage: first_amount(&self.estimated_damage, text),
            },
            claim_type: first_text(&self.claim_type, text).map(|t| t.to_lowercase()),
            attachments: first_list(&self.attachments, text),
            initial_estimate: first_amount(&self.initial_estimate, text),
        }
    }

    /// Description line plus any continuation lines up to a blank line or the next label
    fn description(&self, text: &str) -> Option<String> {
        for pattern in &self.description {
            let Some(first_line) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };

            // Continuation lines only extend a value that starts on the label's line
            let first = first_line.as_str().trim();
            if first.is_empty() {
                continue;
            }

            let mut parts = vec![first];
            // The capture stops at a newline, so the first split piece is always empty
            for line in text[first_line.end()..].split('\n').skip(1) {
                let line = line.trim();
                if line.is_empty() || self.label_line.is_match(line) {
                    break;
                }
                parts.push(line);
            }

            return Some(parts.join(" "));
        }
        None
    }
}

#[async_trait]
impl ExtractionStrategy for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExternalExtractionFailure> {
        Ok(self.extract_fields(text))
    }
}

/// Compile case-insensitive patterns. Inputs are literals, so failure is a bug.
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
}

/// First alternative whose capture is non-blank after trimming
fn first_text(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        let value = pattern.captures(text)?.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// First alternative that matches decides the amount, even if it fails to parse
fn first_amount(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text)?.get(1))
        .and_then(|raw| parse_amount(raw.as_str()))
}

/// First alternative that yields at least one real list entry
fn first_list(patterns: &[Regex], text: &str) -> Option<Vec<String>> {
    patterns.iter().find_map(|pattern| {
        let raw = pattern.captures(text)?.get(1)?.as_str();
        let items: Vec<String> = raw
            .split([',', ';'])
            .map(str::trim)
            .filter(|item| {
                !item.is_empty() && !EMPTY_LIST_MARKERS.contains(&item.to_lowercase().as_str())
            })
            .map(str::to_string)
            .collect();
        (!items.is_empty()).then_some(items)
    })
}

/// Parse a currency-like string, ignoring symbols and thousands separators
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MandatoryField;
    use crate::service::routing::identify_missing_fields;

    const COMPLETE_FNOL: &str = "
    Policy Number: ABC123456
    Policyholder: John Smith
    Effective Dates: 01/01/2023 - 12/31/2023

    Incident Date: 12/15/2023
    Incident Time: 2:30 PM
    Location: 123 Main Street, Springfield
    Description: Vehicle collision at intersection

    Claimant: John Smith
    Third Parties: Jane Doe; Acme Logistics
    Contact: 555-1234

    Claim Type: property
    Asset Type: Vehicle
    VIN: 1HGBH41JXMN109186
    Estimated Damage: $5,000.00
    Initial Estimate: $4,750.50
    Attachments: photos.zip, police_report.pdf
    ";

    #[test]
    fn test_complete_document() {
        let fields = PatternExtractor::new().extract_fields(COMPLETE_FNOL);

        assert_eq!(fields.policy_information.policy_number.as_deref(), Some("ABC123456"));
        assert_eq!(fields.policy_information.policyholder_name.as_deref(), Some("John Smith"));
        assert_eq!(
            fields.policy_information.effective_dates.as_deref(),
            Some("01/01/2023 - 12/31/2023")
        );
        assert_eq!(fields.incident_information.date.as_deref(), Some("12/15/2023"));
        assert_eq!(fields.incident_information.time.as_deref(), Some("2:30 PM"));
        assert_eq!(
            fields.incident_information.location.as_deref(),
            Some("123 Main Street, Springfield")
        );
        assert_eq!(
            fields.incident_information.description.as_deref(),
            Some("Vehicle collision at intersection")
        );
        assert_eq!(fields.involved_parties.claimant.as_deref(), Some("John Smith"));
        assert_eq!(
            fields.involved_parties.third_parties,
            Some(vec!["Jane Doe".to_string(), "Acme Logistics".to_string()])
        );
        assert_eq!(fields.involved_parties.contact_details.as_deref(), Some("555-1234"));
        assert_eq!(fields.claim_type.as_deref(), Some("property"));
        assert_eq!(fields.asset_details.asset_type.as_deref(), Some("Vehicle"));
        assert_eq!(fields.asset_details.asset_id.as_deref(), Some("1HGBH41JXMN109186"));
        assert_eq!(fields.asset_details.estimated_damage, Some(5000.0));
        assert_eq!(fields.initial_estimate, Some(4750.5));
        assert_eq!(
            fields.attachments,
            Some(vec!["photos.zip".to_string(), "police_report.pdf".to_string()])
        );
    }

    #[test]
    fn test_compact_document() {
        let text = "Policy Number: ABC123456\nIncident Date: 12/15/2023\nDescription: Vehicle collision\nClaim Type: property\nEstimated Damage: $5,000.00";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(fields.policy_information.policy_number.as_deref(), Some("ABC123456"));
        assert_eq!(fields.incident_information.date.as_deref(), Some("12/15/2023"));
        assert_eq!(
            fields.incident_information.description.as_deref(),
            Some("Vehicle collision")
        );
        assert_eq!(fields.claim_type.as_deref(), Some("property"));
        assert_eq!(fields.asset_details.estimated_damage, Some(5000.0));
        assert_eq!(fields.policy_information.policyholder_name, None);
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let text = "Policy Number: XYZ789\nIncident Date: 01/20/2024\nDescription: Minor fender bender";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(fields.policy_information.policy_number.as_deref(), Some("XYZ789"));
        assert!(
            fields
                .incident_information
                .description
                .unwrap()
                .contains("fender bender")
        );
        assert_eq!(fields.policy_information.policyholder_name, None);
        assert_eq!(fields.incident_information.time, None);
        assert_eq!(fields.asset_details.estimated_damage, None);
        assert_eq!(fields.involved_parties.third_parties, None);
        assert_eq!(fields.attachments, None);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        let extractor = PatternExtractor::new();

        for text in [
            "",
            "   \n\t  ",
            "%%%%",
            "ünïcödé ✓ 日本語 Description:",
            ":::\n:::",
        ] {
            let fields = extractor.extract_fields(text);
            assert_eq!(fields, ExtractedFields::default(), "input: {text:?}");
        }
    }

    #[test]
    fn test_date_formats() {
        let extractor = PatternExtractor::new();
        let cases = [
            ("Incident Date: 12/15/2023", "12/15/2023"),
            ("Date of Incident: 12-15-2023", "12-15-2023"),
            ("Loss Date: 01/05/2024", "01/05/2024"),
            ("Happened on 3/4/24 near the bridge", "3/4/24"),
        ];

        for (text, expected) in cases {
            let fields = extractor.extract_fields(text);
            assert_eq!(
                fields.incident_information.date.as_deref(),
                Some(expected),
                "input: {text}"
            );
        }
    }

    #[test]
    fn test_labeled_date_beats_bare_date() {
        let text = "Reported 02/02/2024\nAccident Date: 01/30/2024";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(fields.incident_information.date.as_deref(), Some("01/30/2024"));
    }

    #[test]
    fn test_currency_formats() {
        let extractor = PatternExtractor::new();
        let cases = [
            ("Estimated Damage: $5,000.00", 5000.0),
            ("Damage: $25000", 25000.0),
            ("Loss Amount: 1500.50", 1500.5),
            ("Estimated Damage: € 1,234,567.89", 1_234_567.89),
        ];

        for (text, expected) in cases {
            let fields = extractor.extract_fields(text);
            assert_eq!(fields.asset_details.estimated_damage, Some(expected), "input: {text}");
        }
    }

    #[test]
    fn test_unparsable_amount_is_absent() {
        let fields = PatternExtractor::new().extract_fields("Estimated Damage: $,,,\nDamage: 100");

        // The first matching alternative decides, even when its value is unusable
        assert_eq!(fields.asset_details.estimated_damage, None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$5,000.00"), Some(5000.0));
        assert_eq!(parse_amount("£ 12"), Some(12.0));
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let text = "POLICY NUMBER: pol-42\nclaim type: INJURY\nincident time: 9:15 am";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(fields.policy_information.policy_number.as_deref(), Some("pol-42"));
        assert_eq!(fields.claim_type.as_deref(), Some("injury"));
        assert_eq!(fields.incident_information.time.as_deref(), Some("9:15 am"));
    }

    #[test]
    fn test_policy_period_is_not_a_policy_number() {
        let text = "Policy Period: 01/01/2023 - 12/31/2023\nPolicyholder Name: Maria Lopez";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(fields.policy_information.policy_number, None);
        assert_eq!(
            fields.policy_information.policyholder_name.as_deref(),
            Some("Maria Lopez")
        );
        assert_eq!(
            fields.policy_information.effective_dates.as_deref(),
            Some("01/01/2023 - 12/31/2023")
        );
    }

    #[test]
    fn test_multiline_description_stops_at_next_label() {
        let text = "Description: Rear-end collision on the highway.\nThe other driver left the scene\nafter exchanging details.\nClaim Type: auto\nEstimated Damage: 800";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(
            fields.incident_information.description.as_deref(),
            Some(
                "Rear-end collision on the highway. The other driver left the scene after exchanging details."
            )
        );
        assert_eq!(fields.claim_type.as_deref(), Some("auto"));
    }

    #[test]
    fn test_description_continuation_keeps_clock_times() {
        let text = "Description: Water leak discovered\nat 7:45 in the kitchen\n\nLocation: Unit 4B";

        let fields = PatternExtractor::new().extract_fields(text);

        assert_eq!(
            fields.incident_information.description.as_deref(),
            Some("Water leak discovered at 7:45 in the kitchen")
        );
    }

    #[test]
    fn test_label_without_value_does_not_take_next_line() {
        let extractor = PatternExtractor::new();

        let fields = extractor.extract_fields("Policy Number:\nPolicyholder: John Smith");
        assert_eq!(fields.policy_information.policy_number, None);
        assert_eq!(
            fields.policy_information.policyholder_name.as_deref(),
            Some("John Smith")
        );

        let fields = extractor.extract_fields("Claim Type:\nEstimated Damage: 900\nLocation:\n");
        assert_eq!(fields.claim_type, None);
        assert_eq!(fields.incident_information.location, None);
        assert_eq!(fields.asset_details.estimated_damage, Some(900.0));

        let fields = extractor.extract_fields("Policyholder:\nJohn Smith\nEstimated Damage:\n$500");
        assert_eq!(fields.policy_information.policyholder_name, None);
        assert_eq!(fields.asset_details.estimated_damage, None);
    }

    #[test]
    fn test_empty_description_label_is_missing() {
        let extractor = PatternExtractor::new();

        let fields = extractor.extract_fields("Description:\n\nClaim Type: property");
        assert_eq!(fields.incident_information.description, None);
        assert_eq!(fields.claim_type.as_deref(), Some("property"));
        assert!(identify_missing_fields(&fields).contains(&MandatoryField::IncidentDescription));

        // Trailing blanks on the label line do not start a value either
        let fields = extractor.extract_fields("Description:   \nCar was hit while parked");
        assert_eq!(fields.incident_information.description, None);
    }

    #[test]
    fn test_placeholder_lists_are_absent() {
        let fields =
            PatternExtractor::new().extract_fields("Attachments: None\nThird Parties: N/A");

        assert_eq!(fields.attachments, None);
        assert_eq!(fields.involved_parties.third_parties, None);
    }

    #[test]
    fn test_asset_id_alternatives() {
        let extractor = PatternExtractor::new();

        let plate = extractor.extract_fields("License Plate: 7ABC-123");
        assert_eq!(plate.asset_details.asset_id.as_deref(), Some("7ABC-123"));

        let asset = extractor.extract_fields("Asset ID: BLD-0042");
        assert_eq!(asset.asset_details.asset_id.as_deref(), Some("BLD-0042"));
    }

    #[tokio::test]
    async fn test_strategy_never_fails() {
        let extractor = PatternExtractor::new();

        let fields = extractor.extract("").await.unwrap();

        assert_eq!(fields, ExtractedFields::default());
        assert_eq!(extractor.name(), "pattern");
    }
}
