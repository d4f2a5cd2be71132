//! Claim routing
//!
//! Routing is an ordered rule table evaluated top to bottom; the first rule
//! whose predicate holds decides the route. Claims matching no rule go to
//! [`Route::Standard`].

use crate::model::{ExtractedFields, MandatoryField, Route, RouteDecision};

pub mod completeness;

pub use completeness::identify_missing_fields;

/// Description substrings that send a claim to investigation (case-insensitive)
pub const FRAUD_KEYWORDS: &[&str] = &["fraud", "inconsistent", "staged"];

/// Damage strictly below this amount is eligible for fast-track processing
pub const FAST_TRACK_THRESHOLD: f64 = 25_000.0;

/// Claim type handled by the specialist queue (case-insensitive)
pub const INJURY_CLAIM_TYPE: &str = "injury";

/// Inputs every routing rule is evaluated against
struct RoutingContext<'a> {
    fields: &'a ExtractedFields,
    missing: &'a [MandatoryField],
}

struct RoutingRule {
    route: Route,
    applies: fn(&RoutingContext<'_>) -> bool,
    reasoning: fn(&RoutingContext<'_>) -> String,
}

/// Routing rules in priority order
const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        route: Route::Investigation,
        applies: |ctx| {
            has_fraud_indicators(ctx.fields.incident_information.description.as_deref())
        },
        reasoning: |_| {
            "Claim flagged for investigation due to fraud indicators in the incident description. \
             Manual review required to assess validity."
                .to_string()
        },
    },
    RoutingRule {
        route: Route::ManualReview,
        applies: |ctx| !ctx.missing.is_empty(),
        reasoning: |ctx| {
            let missing = ctx
                .missing
                .iter()
                .map(|field| field.path())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Claim requires manual review due to missing mandatory fields: {missing}. \
                 Complete information is needed before processing can continue."
            )
        },
    },
    RoutingRule {
        route: Route::SpecialistQueue,
        applies: |ctx| {
            ctx.fields
                .claim_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(INJURY_CLAIM_TYPE))
        },
        reasoning: |_| {
            "Claim routed to specialist queue due to injury claim type. \
             Injury-related claims require specialized handling."
                .to_string()
        },
    },
    RoutingRule {
        route: Route::FastTrack,
        applies: |ctx| {
            ctx.fields
                .asset_details
                .estimated_damage
                .is_some_and(|damage| damage < FAST_TRACK_THRESHOLD)
        },
        reasoning: |ctx| {
            let damage = ctx.fields.asset_details.estimated_damage.unwrap_or_default();
            format!(
                "Claim eligible for fast-track processing with estimated damage of {}, \
                 which is below the {} threshold.",
                format_currency(damage),
                format_currency(FAST_TRACK_THRESHOLD)
            )
        },
    },
];

const STANDARD_REASONING: &str = "Claim routed to standard processing queue. \
     No special conditions identified requiring alternative routing.";

/// Whether the description contains any fraud keyword, ignoring case
pub fn has_fraud_indicators(description: Option<&str>) -> bool {
    let Some(description) = description else {
        return false;
    };

    let description = description.to_lowercase();
    FRAUD_KEYWORDS
        .iter()
        .any(|keyword| description.contains(keyword))
}

/// Decide the route for a claim
///
/// `missing` must be the output of [`identify_missing_fields`] for the same
/// fields; its order is reproduced in the reasoning.
pub fn determine_route(fields: &ExtractedFields, missing: &[MandatoryField]) -> RouteDecision {
    let ctx = RoutingContext { fields, missing };

    ROUTING_RULES
        .iter()
        .find(|rule| (rule.applies)(&ctx))
        .map(|rule| RouteDecision {
            route: rule.route,
            reasoning: (rule.reasoning)(&ctx),
        })
        .unwrap_or_else(|| RouteDecision {
            route: Route::Standard,
            reasoning: STANDARD_REASONING.to_string(),
        })
}

/// Two-decimal currency with thousands separators, e.g. `$25,000.00`
fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
