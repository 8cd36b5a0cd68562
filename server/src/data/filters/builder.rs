//! Predicate builder
//!
//! Turns loosely-typed, comma-separated query values into a [`Predicate`].
//! Includes the per-resource field whitelists.

use super::types::{Condition, FieldKind, FilterField, OrGroup, Predicate};

/// Split a raw query value on `,`, trim each piece and drop empties
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accumulates OR-groups for an AND-combined predicate
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    groups: Vec<OrGroup>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a whitelisted field. Absent values, and values with no usable
    /// tokens, contribute nothing.
    pub fn field(mut self, field: &FilterField, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };

        let conditions: Vec<Condition> = split_values(raw)
            .into_iter()
            .filter_map(|token| match field.kind {
                FieldKind::Text => Some(Condition::Contains {
                    column: field.column,
                    value: token.to_lowercase(),
                }),
                FieldKind::Boolean => Some(Condition::BoolEq {
                    column: field.column,
                    value: token == "true",
                }),
                FieldKind::Enum(members) => {
                    if members.contains(&token.as_str()) {
                        Some(Condition::Equals {
                            column: field.column,
                            value: token,
                        })
                    } else {
                        tracing::trace!(param = field.param, %token, "Dropping invalid enum token");
                        None
                    }
                }
            })
            .collect();

        if let Some(group) = OrGroup::new(conditions) {
            self.groups.push(group);
        }
        self
    }

    /// Add inclusive numeric bounds. Each present bound is its own group.
    pub fn range(mut self, column: &'static str, min: Option<f64>, max: Option<f64>) -> Self {
        if let Some(value) = min {
            self.groups.extend(OrGroup::new(vec![Condition::Gte { column, value }]));
        }
        if let Some(value) = max {
            self.groups.extend(OrGroup::new(vec![Condition::Lte { column, value }]));
        }
        self
    }

    pub fn build(self) -> Predicate {
        Predicate::from_groups(self.groups)
    }
}

/// Field whitelists for each listable resource
///
/// Columns carry the table alias used by the list queries
/// (`u` users, `c` climber_profiles, `b` belayer_profiles). Text fields
/// target the lowercased `*_folded` copy of their column.
pub mod columns {
    use super::super::types::{FieldKind, FilterField};
    use crate::data::types::Role;

    pub const USER_NAME: FilterField = FilterField {
        param: "name",
        column: "u.name_folded",
        kind: FieldKind::Text,
    };
    pub const USER_EMAIL: FilterField = FilterField {
        param: "email",
        column: "u.email_folded",
        kind: FieldKind::Text,
    };
    pub const USER_ROLE: FilterField = FilterField {
        param: "role",
        column: "u.role",
        kind: FieldKind::Enum(Role::NAMES),
    };

    pub const CLIMBER_LOCATION: FilterField = FilterField {
        param: "location",
        column: "c.location_folded",
        kind: FieldKind::Text,
    };
    pub const CLIMBER_PREFERENCES: FilterField = FilterField {
        param: "preferences",
        column: "c.preferences_folded",
        kind: FieldKind::Text,
    };
    pub const CLIMBER_BIO: FilterField = FilterField {
        param: "bio",
        column: "c.bio_folded",
        kind: FieldKind::Text,
    };

    pub const BELAYER_BIO: FilterField = FilterField {
        param: "bio",
        column: "b.bio_folded",
        kind: FieldKind::Text,
    };
    pub const BELAYER_LOCATION: FilterField = FilterField {
        param: "location",
        column: "b.location_folded",
        kind: FieldKind::Text,
    };
    pub const BELAYER_AVAILABILITY: FilterField = FilterField {
        param: "availability",
        column: "b.availability_folded",
        kind: FieldKind::Text,
    };
    pub const BELAYER_CERTIFIED_LEAD: FilterField = FilterField {
        param: "certifiedLead",
        column: "b.certified_lead",
        kind: FieldKind::Boolean,
    };
    pub const BELAYER_CERTIFIED_TOP_ROPE: FilterField = FilterField {
        param: "certifiedTopRope",
        column: "b.certified_top_rope",
        kind: FieldKind::Boolean,
    };

    pub const BELAYER_HOURLY_RATE: &str = "b.hourly_rate";
    pub const BELAYER_RATING: &str = "b.rating";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{SqlParams, SqlValue};

    fn contains(column: &'static str, value: &str) -> Condition {
        Condition::Contains {
            column,
            value: value.to_string(),
        }
    }

    #[test]
    fn split_values_trims_and_drops_empties() {
        assert_eq!(split_values("NYC, , nyc"), vec!["NYC", "nyc"]);
        assert_eq!(split_values(" a ,b,,c "), vec!["a", "b", "c"]);
        assert!(split_values("").is_empty());
        assert!(split_values(" , ,").is_empty());
    }

    #[test]
    fn split_values_is_idempotent() {
        for raw in ["NYC, , nyc", " a ,b,,c ", "", "  ", "one", ",x,"] {
            let once = split_values(raw);
            let twice = split_values(&once.join(","));
            assert_eq!(once, twice, "input {:?}", raw);
        }
    }

    #[test]
    fn text_field_builds_or_group() {
        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("NYC, , nyc"))
            .build();

        assert_eq!(predicate.groups().len(), 1);
        assert_eq!(
            predicate.groups()[0].conditions(),
            &[
                contains("c.location_folded", "nyc"),
                contains("c.location_folded", "nyc")
            ]
        );
    }

    #[test]
    fn text_tokens_fold_unicode_case() {
        let predicate = PredicateBuilder::new()
            .field(&columns::BELAYER_LOCATION, Some("ÉCRINS"))
            .build();
        assert_eq!(
            predicate.groups()[0].conditions(),
            &[contains("b.location_folded", "écrins")]
        );
    }

    #[test]
    fn whitespace_only_value_is_ignored() {
        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("   "))
            .field(&columns::CLIMBER_BIO, Some(""))
            .field(&columns::CLIMBER_PREFERENCES, None)
            .build();
        assert!(predicate.is_match_all());
    }

    #[test]
    fn boolean_field_keeps_explicit_false() {
        let predicate = PredicateBuilder::new()
            .field(&columns::BELAYER_CERTIFIED_LEAD, Some("false"))
            .build();
        assert_eq!(
            predicate.groups()[0].conditions(),
            &[Condition::BoolEq {
                column: "b.certified_lead",
                value: false
            }]
        );
    }

    #[test]
    fn boolean_field_true_and_false_is_explicit_or() {
        let predicate = PredicateBuilder::new()
            .field(&columns::BELAYER_CERTIFIED_LEAD, Some("true,false"))
            .build();
        assert!(!predicate.is_match_all());
        assert_eq!(
            predicate.groups()[0].conditions(),
            &[
                Condition::BoolEq {
                    column: "b.certified_lead",
                    value: true
                },
                Condition::BoolEq {
                    column: "b.certified_lead",
                    value: false
                }
            ]
        );
    }

    #[test]
    fn boolean_field_malformed_tokens_are_false() {
        let predicate = PredicateBuilder::new()
            .field(&columns::BELAYER_CERTIFIED_TOP_ROPE, Some("TRUE,yes,1"))
            .build();
        assert!(
            predicate.groups()[0]
                .conditions()
                .iter()
                .all(|c| matches!(c, Condition::BoolEq { value: false, .. }))
        );
    }

    #[test]
    fn enum_field_drops_invalid_tokens() {
        let mixed = PredicateBuilder::new()
            .field(&columns::USER_ROLE, Some("ADMIN,bogus"))
            .build();
        let clean = PredicateBuilder::new()
            .field(&columns::USER_ROLE, Some("ADMIN"))
            .build();
        assert_eq!(mixed, clean);
    }

    #[test]
    fn enum_field_all_invalid_is_ignored() {
        let predicate = PredicateBuilder::new()
            .field(&columns::USER_ROLE, Some("bogus, admin"))
            .build();
        assert!(predicate.is_match_all());
    }

    #[test]
    fn range_bounds_are_independent() {
        let predicate = PredicateBuilder::new()
            .range(columns::BELAYER_HOURLY_RATE, Some(10.0), None)
            .range(columns::BELAYER_RATING, None, Some(4.5))
            .range(columns::BELAYER_RATING, None, None)
            .build();

        let mut params = SqlParams::default();
        assert_eq!(
            predicate.to_sql(&mut params),
            "(b.hourly_rate >= ?) AND (b.rating <= ?)"
        );
        assert_eq!(
            params.values,
            vec![SqlValue::Real(10.0), SqlValue::Real(4.5)]
        );
    }

    #[test]
    fn fields_combine_with_and() {
        let predicate = PredicateBuilder::new()
            .field(&columns::USER_NAME, Some("alex,SAM"))
            .field(&columns::USER_ROLE, Some("CLIMBER"))
            .build();

        let mut params = SqlParams::default();
        assert_eq!(
            predicate.to_sql(&mut params),
            "(u.name_folded LIKE ? ESCAPE '\\' OR u.name_folded LIKE ? ESCAPE '\\') AND (u.role = ?)"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Text("%alex%".into()),
                SqlValue::Text("%sam%".into()),
                SqlValue::Text("CLIMBER".into())
            ]
        );
    }
}
