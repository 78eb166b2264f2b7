//! Catalog-facing schema types.

/// Key classification of a column as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    /// Part of the primary key.
    Primary,
    /// Covered by a unique index.
    Unique,
    /// Covered by a non-unique index.
    Indexed,
    /// Not indexed.
    #[default]
    None,
}

/// One database column, in catalog terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name, never empty.
    pub name: String,
    /// Raw column type as the catalog reports it (e.g. `varchar(255)`).
    pub column_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Key classification.
    pub key: KeyKind,
    /// Default value literal, if any.
    pub default_value: Option<String>,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Column comment.
    pub comment: String,
}

impl ColumnInfo {
    /// Returns true if this is the primary-key column.
    pub fn is_primary(&self) -> bool {
        self.key == KeyKind::Primary
    }
}

/// A described table: name, comment and columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub comment: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Returns true if any column carries the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Returns the primary-key column, if the table has one.
    pub fn primary_key(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.is_primary())
    }
}
