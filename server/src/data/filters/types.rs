//! Filter type definitions

use crate::utils::sql::escape_like_pattern;

/// How the raw tokens of a filter field are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Case-insensitive substring containment against a lowercased column
    Text,
    /// `"true"` is true, every other token is false
    Boolean,
    /// Exact match against one of the listed members; other tokens are dropped
    Enum(&'static [&'static str]),
}

/// A filterable query parameter and the column it targets
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

/// A single column test
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Contains { column: &'static str, value: String },
    BoolEq { column: &'static str, value: bool },
    Equals { column: &'static str, value: String },
    Gte { column: &'static str, value: f64 },
    Lte { column: &'static str, value: f64 },
}

impl Condition {
    /// Generate SQL fragment with a `?` placeholder and push its bind value
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        match self {
            Self::Contains { column, value } => {
                let escaped = escape_like_pattern(value);
                params.push(SqlValue::Text(format!("%{}%", escaped)));
                format!("{} LIKE ? ESCAPE '\\'", column)
            }
            Self::BoolEq { column, value } => {
                params.push(SqlValue::Bool(*value));
                format!("{} = ?", column)
            }
            Self::Equals { column, value } => {
                params.push(SqlValue::Text(value.clone()));
                format!("{} = ?", column)
            }
            Self::Gte { column, value } => {
                params.push(SqlValue::Real(*value));
                format!("{} >= ?", column)
            }
            Self::Lte { column, value } => {
                params.push(SqlValue::Real(*value));
                format!("{} <= ?", column)
            }
        }
    }
}

/// Conditions combined with OR. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct OrGroup {
    conditions: Vec<Condition>,
}

impl OrGroup {
    /// Returns `None` for an empty condition list
    pub fn new(conditions: Vec<Condition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self { conditions })
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// OR-groups combined with AND. No groups means match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    groups: Vec<OrGroup>,
}

impl Predicate {
    /// Predicate that matches every row
    pub fn match_all() -> Self {
        Self::default()
    }

    pub(super) fn from_groups(groups: Vec<OrGroup>) -> Self {
        Self { groups }
    }

    pub fn is_match_all(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[OrGroup] {
        &self.groups
    }

    /// Generate a SQL WHERE fragment
    /// Returns the SQL with ? placeholders and appends bind values to params in order
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        if self.groups.is_empty() {
            return "1=1".to_string();
        }

        self.groups
            .iter()
            .map(|group| {
                let parts: Vec<String> = group
                    .conditions
                    .iter()
                    .map(|c| c.to_sql(params))
                    .collect();
                format!("({})", parts.join(" OR "))
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Bind value collected while rendering SQL
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Bool(bool),
    Real(f64),
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    pub fn push(&mut self, value: SqlValue) {
        self.values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_renders_tautology() {
        let mut params = SqlParams::default();
        assert_eq!(Predicate::match_all().to_sql(&mut params), "1=1");
        assert!(params.values.is_empty());
    }

    #[test]
    fn test_contains_escapes_and_wraps() {
        let mut params = SqlParams::default();
        let sql = Condition::Contains {
            column: "c.location",
            value: "50%_off".to_string(),
        }
        .to_sql(&mut params);

        assert_eq!(sql, "c.location LIKE ? ESCAPE '\\'");
        assert_eq!(params.values, vec![SqlValue::Text("%50\\%\\_off%".into())]);
    }

    #[test]
    fn test_groups_and_of_ors() {
        let predicate = Predicate::from_groups(vec![
            OrGroup::new(vec![
                Condition::BoolEq {
                    column: "b.certified_lead",
                    value: true,
                },
                Condition::BoolEq {
                    column: "b.certified_lead",
                    value: false,
                },
            ])
            .unwrap(),
            OrGroup::new(vec![Condition::Gte {
                column: "b.hourly_rate",
                value: 20.0,
            }])
            .unwrap(),
        ]);

        let mut params = SqlParams::default();
        let sql = predicate.to_sql(&mut params);
        assert_eq!(
            sql,
            "(b.certified_lead = ? OR b.certified_lead = ?) AND (b.hourly_rate >= ?)"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Bool(true),
                SqlValue::Bool(false),
                SqlValue::Real(20.0)
            ]
        );
    }

    #[test]
    fn test_or_group_rejects_empty() {
        assert!(OrGroup::new(vec![]).is_none());
    }
}
