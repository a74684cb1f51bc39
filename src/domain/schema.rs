//! Results table schema construction.
//!
//! The column layout is fixed when the store is created: a constant metric
//! prefix followed by one text column per selected space. Insert statements
//! are derived from the same ordering, so DDL and writes can never disagree.

use crate::domain::space::Space;

/// Name of the single results table.
pub const TABLE_NAME: &str = "hyperopt_results";

/// SQLite storage class plus constraint for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    PrimaryKey,
    Integer,
    Real,
    Text,
}

impl ColumnType {
    fn decl(&self) -> &'static str {
        match self {
            ColumnType::PrimaryKey => "INTEGER PRIMARY KEY",
            ColumnType::Integer => "INTEGER NOT NULL",
            ColumnType::Real => "REAL NOT NULL",
            ColumnType::Text => "TEXT NOT NULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Metric columns every store carries, ahead of the per-space columns.
pub const FIXED_COLUMNS: [ColumnDef; 10] = [
    ColumnDef { name: "id", ty: ColumnType::PrimaryKey },
    ColumnDef { name: "iteration", ty: ColumnType::Integer },
    ColumnDef { name: "best_local_min", ty: ColumnType::Text },
    ColumnDef { name: "current_epoch", ty: ColumnType::Integer },
    ColumnDef { name: "trades_count", ty: ColumnType::Integer },
    ColumnDef { name: "avg_profit_pct", ty: ColumnType::Real },
    ColumnDef { name: "total_profit_currency", ty: ColumnType::Real },
    ColumnDef { name: "total_profit_pct", ty: ColumnType::Real },
    ColumnDef { name: "avg_duration_minutes", ty: ColumnType::Real },
    ColumnDef { name: "loss_func", ty: ColumnType::Real },
];

/// Ordered column layout of one results store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<ColumnDef>,
}

/// Build the table layout for a resolved space selection.
pub fn build_schema(spaces: &[Space]) -> TableSchema {
    let mut columns = FIXED_COLUMNS.to_vec();
    for space in spaces {
        columns.push(ColumnDef {
            name: space.token(),
            ty: ColumnType::Text,
        });
    }
    TableSchema { columns }
}

impl TableSchema {
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Columns covered by an insert: everything except the autoincrement id.
    pub fn insert_column_count(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn create_table_sql(&self) -> String {
        let defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.ty.decl()))
            .collect();
        format!("CREATE TABLE {} ({})", TABLE_NAME, defs.join(", "))
    }

    /// Insert statement with positional placeholders matching [`Self::columns`]
    /// order, id omitted.
    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.columns[1..].iter().map(|c| c.name).collect();
        let placeholders: Vec<String> =
            (1..=names.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            names.join(", "),
            placeholders.join(", ")
        )
    }
}
