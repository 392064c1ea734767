//! Custom-table CRUD plugin generation.
//!
//! The flow is: raw column rows → [`ColumnSpec`]s → DDL lines and the
//! allow-list → one PHP plugin file.

mod allow_list;
mod column;
mod ddl;
mod descriptor;
mod render;

pub use allow_list::AllowedColumnSet;
pub use column::{
    ColumnSpec, ColumnTable, DEFAULT_SQL_TYPE, DefaultValue, DroppedColumn, PRIMARY_KEY,
    RawColumn, read_column_table, read_columns,
};
pub use ddl::{CREATED_AT_LINE, PRIMARY_KEY_LINE, UPDATED_AT_LINE, column_lines};
pub use descriptor::{
    DEFAULT_ENTITY, DEFAULT_OPTION_KEY, DEFAULT_REST_NAMESPACE, DEFAULT_VERSION,
    DEFAULT_VERSION_CONSTANT, DEFAULT_WRITE_CAPABILITY, EntityDescriptor,
};
pub use render::{DEFAULT_PER_PAGE, PluginRenderer, render};
