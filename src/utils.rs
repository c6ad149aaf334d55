//! Helpers for Hive-style table qualified names.
//!
//! Atlas names tables `db.table@cluster`. Both the database and the cluster
//! are optional; when absent they are [`DEFAULT_DB_CLUSTER`].
//!
//! # Example
//!
//! ```rust
//! use atlas_client::utils::{make_table_qualified_name, parse_table_qualified_name};
//!
//! let qn = parse_table_qualified_name("sales.orders@primary");
//! assert_eq!(qn.db_name, "sales");
//! assert_eq!(qn.table_name, "orders");
//! assert_eq!(qn.cluster_name, "primary");
//!
//! assert_eq!(make_table_qualified_name("orders", Some("default"), Some("sales")), "sales.orders");
//! ```

/// Database and cluster name used when a qualified name omits them.
pub const DEFAULT_DB_CLUSTER: &str = "default";

/// The parts of a table qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableQualifiedName {
    /// The database name.
    pub db_name: String,
    /// The table name.
    pub table_name: String,
    /// The cluster name.
    pub cluster_name: String,
}

/// Splits `db.table@cluster` into its parts.
///
/// The cluster follows the last `@`; the database precedes the first `.`.
/// Missing parts default to [`DEFAULT_DB_CLUSTER`].
#[must_use]
pub fn parse_table_qualified_name(qualified_name: &str) -> TableQualifiedName {
    let (rest, cluster) = match qualified_name.rsplit_once('@') {
        Some((rest, cluster)) => (rest, cluster),
        None => (qualified_name, DEFAULT_DB_CLUSTER),
    };
    let (db, table) = match rest.split_once('.') {
        Some((db, table)) => (db, table),
        None => (DEFAULT_DB_CLUSTER, rest),
    };
    TableQualifiedName {
        db_name: db.to_string(),
        table_name: table.to_string(),
        cluster_name: cluster.to_string(),
    }
}

/// Builds `db.table@cluster`, leaving out default or missing parts.
#[must_use]
pub fn make_table_qualified_name(table_name: &str, cluster: Option<&str>, db: Option<&str>) -> String {
    let mut qualified_name = table_name.to_string();
    if let Some(db) = db.filter(|db| !db.is_empty() && *db != DEFAULT_DB_CLUSTER) {
        qualified_name = format!("{db}.{qualified_name}");
    }
    if let Some(cluster) = cluster.filter(|c| !c.is_empty() && *c != DEFAULT_DB_CLUSTER) {
        qualified_name = format!("{qualified_name}@{cluster}");
    }
    qualified_name
}
