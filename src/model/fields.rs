//! Structured FNOL field set shared by both extraction strategies and the router

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Policy-related information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInformation {
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub policyholder_name: Option<String>,
    /// Policy effective date range, free text
    #[serde(default)]
    pub effective_dates: Option<String>,
}

/// When, where and what happened
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentInformation {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvolvedParties {
    #[serde(default)]
    pub claimant: Option<String>,
    #[serde(default)]
    pub third_parties: Option<Vec<String>>,
    #[serde(default)]
    pub contact_details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetails {
    #[serde(default)]
    pub asset_type: Option<String>,
    /// VIN, license plate or any other asset identifier
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Estimated damage in the document's currency unit
    #[serde(default)]
    pub estimated_damage: Option<f64>,
}

/// Complete set of fields extracted from an FNOL document
///
/// The four groups are always present; only their leaves may be absent.
/// Absent leaves serialize as `null`, never as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub policy_information: PolicyInformation,
    pub incident_information: IncidentInformation,
    pub involved_parties: InvolvedParties,
    pub asset_details: AssetDetails,
    #[serde(default)]
    pub claim_type: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<String>>,
    #[serde(default)]
    pub initial_estimate: Option<f64>,
}

/// Value of a mandatory field as seen by the completeness check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Amount(Option<f64>),
}

impl FieldValue<'_> {
    /// Absent, or a string that is empty after trimming
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.is_none_or(|s| s.trim().is_empty()),
            FieldValue::Amount(value) => value.is_none(),
        }
    }
}

/// Fields that must be present for a claim to be considered complete
///
/// Variants are declared in reporting order; [`MandatoryField::ALL`] follows
/// the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MandatoryField {
    #[serde(rename = "policyInformation.policyNumber")]
    PolicyNumber,
    #[serde(rename = "policyInformation.policyholderName")]
    PolicyholderName,
    #[serde(rename = "incidentInformation.date")]
    IncidentDate,
    #[serde(rename = "incidentInformation.description")]
    IncidentDescription,
    #[serde(rename = "claimType")]
    ClaimType,
    #[serde(rename = "assetDetails.estimatedDamage")]
    EstimatedDamage,
}

impl MandatoryField {
    pub const ALL: [MandatoryField; 6] = [
        MandatoryField::PolicyNumber,
        MandatoryField::PolicyholderName,
        MandatoryField::IncidentDate,
        MandatoryField::IncidentDescription,
        MandatoryField::ClaimType,
        MandatoryField::EstimatedDamage,
    ];

    /// Dotted path of the field in the serialized schema
    pub fn path(self) -> &'static str {
        match self {
            MandatoryField::PolicyNumber => "policyInformation.policyNumber",
            MandatoryField::PolicyholderName => "policyInformation.policyholderName",
            MandatoryField::IncidentDate => "incidentInformation.date",
            MandatoryField::IncidentDescription => "incidentInformation.description",
            MandatoryField::ClaimType => "claimType",
            MandatoryField::EstimatedDamage => "assetDetails.estimatedDamage",
        }
    }

    pub fn value(self, fields: &ExtractedFields) -> FieldValue<'_> {
        match self {
            MandatoryField::PolicyNumber => {
                FieldValue::Text(fields.policy_information.policy_number.as_deref())
            }
            MandatoryField::PolicyholderName => {
                FieldValue::Text(fields.policy_information.policyholder_name.as_deref())
            }
            MandatoryField::IncidentDate => {
                FieldValue::Text(fields.incident_information.date.as_deref())
            }
            MandatoryField::IncidentDescription => {
                FieldValue::Text(fields.incident_information.description.as_deref())
            }
            MandatoryField::ClaimType => FieldValue::Text(fields.claim_type.as_deref()),
            MandatoryField::EstimatedDamage => {
                FieldValue::Amount(fields.asset_details.estimated_damage)
            }
        }
    }
}

impl std::fmt::Display for MandatoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
