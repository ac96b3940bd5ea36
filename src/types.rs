use serde::Serialize;

/// Storage type of an inferred column.
///
/// Log fields are kept as uninterpreted text; comparisons against them follow
/// the engine's own text/number coercion rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    #[default]
    Text,
}

impl ColumnType {
    /// The type name used in a column definition.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
