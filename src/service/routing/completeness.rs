//! Mandatory field completeness check

use crate::model::{ExtractedFields, MandatoryField};

/// Mandatory fields that are absent or blank, in declaration order
pub fn identify_missing_fields(fields: &ExtractedFields) -> Vec<MandatoryField> {
    MandatoryField::ALL
        .into_iter()
        .filter(|field| field.value(fields).is_missing())
        .collect()
}
