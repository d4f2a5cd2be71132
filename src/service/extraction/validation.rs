//! Validation of structured-model output
//!
//! The model answer has already been parsed into [`ExtractedFields`], so the
//! shape is right. This checks the value invariants serde cannot express and
//! normalizes harmless deviations.

use crate::model::ExtractedFields;

/// Result of model output validation
#[derive(Debug)]
pub struct FieldValidationResult {
    /// Whether the output can be used as-is after normalization
    pub is_valid: bool,
    /// Invariant violations that make the output unusable
    pub errors: Vec<String>,
    /// Values that were normalized away
    pub warnings: Vec<String>,
}

impl FieldValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate model output and normalize it in place
///
/// Checks:
/// 1. Amounts are finite and non-negative (error)
/// 2. Strings are trimmed; blank strings become absent (warning)
/// 3. List entries are trimmed; blank entries are dropped, an empty list becomes absent (warning)
pub fn validate_extracted_fields(fields: &mut ExtractedFields) -> FieldValidationResult {
    let mut result = FieldValidationResult::valid();

    let policy = &mut fields.policy_information;
    normalize_text("policyInformation.policyNumber", &mut policy.policy_number, &mut result);
    normalize_text(
        "policyInformation.policyholderName",
        &mut policy.policyholder_name,
        &mut result,
    );
    normalize_text("policyInformation.effectiveDates", &mut policy.effective_dates, &mut result);

    let incident = &mut fields.incident_information;
    normalize_text("incidentInformation.date", &mut incident.date, &mut result);
    normalize_text("incidentInformation.time", &mut incident.time, &mut result);
    normalize_text("incidentInformation.location", &mut incident.location, &mut result);
    normalize_text("incidentInformation.description", &mut incident.description, &mut result);

    let parties = &mut fields.involved_parties;
    normalize_text("involvedParties.claimant", &mut parties.claimant, &mut result);
    normalize_list("involvedParties.thirdParties", &mut parties.third_parties, &mut result);
    normalize_text("involvedParties.contactDetails", &mut parties.contact_details, &mut result);

    let asset = &mut fields.asset_details;
    normalize_text("assetDetails.assetType", &mut asset.asset_type, &mut result);
    normalize_text("assetDetails.assetId", &mut asset.asset_id, &mut result);
    check_amount("assetDetails.estimatedDamage", asset.estimated_damage, &mut result);

    normalize_text("claimType", &mut fields.claim_type, &mut result);
    normalize_list("attachments", &mut fields.attachments, &mut result);
    check_amount("initialEstimate", fields.initial_estimate, &mut result);

    result
}

fn normalize_text(path: &str, value: &mut Option<String>, result: &mut FieldValidationResult) {
    let Some(text) = value.as_mut() else {
        return;
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        result.add_warning(format!("{path} is blank, treated as absent"));
        *value = None;
    } else if trimmed.len() != text.len() {
        *text = trimmed.to_string();
    }
}

fn normalize_list(path: &str, value: &mut Option<Vec<String>>, result: &mut FieldValidationResult) {
    let Some(items) = value.as_mut() else {
        return;
    };

    let before = items.len();
    *items = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.len() != before {
        result.add_warning(format!(
            "{path} had {} blank entries, dropped",
            before - items.len()
        ));
    }
    if items.is_empty() {
        *value = None;
    }
}

fn check_amount(path: &str, value: Option<f64>, result: &mut FieldValidationResult) {
    if let Some(amount) = value
        && (!amount.is_finite() || amount < 0.0)
    {
        result.add_error(format!("{path} must be a non-negative amount, got {amount}"));
    }
}
