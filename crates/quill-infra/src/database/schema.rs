//! Startup schema management for the `posts` table.
//!
//! Mirrors an auto-migrate discipline: create the table if absent, then
//! add any column the entity defines that the table does not yet carry.
//! Never destructive, no rollback.

use sea_orm::sea_query::{ColumnDef, Expr, Table, TableAlterStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbBackend, DbConn, EntityName, Schema};

use quill_core::error::RepoError;

use super::entity::post;

/// Ensure the `posts` table exists and carries every column the entity
/// defines. Runs once at startup, before the connection is handed out.
pub async fn ensure(db: &DbConn) -> Result<(), RepoError> {
    let backend = db.get_database_backend();

    db.execute(backend.build(&create_table_statement(backend)))
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    for statement in additive_column_statements() {
        db.execute(backend.build(&statement))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
    }

    tracing::info!("Schema ensured for table `posts`");

    Ok(())
}

pub(crate) fn create_table_statement(backend: DbBackend) -> TableCreateStatement {
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(post::Entity);
    statement.if_not_exists();
    statement
}

/// One `ADD COLUMN IF NOT EXISTS` per non-key column, so a table created
/// by an older record shape picks up later additions.
pub(crate) fn additive_column_statements() -> Vec<TableAlterStatement> {
    let columns = [
        ColumnDef::new(post::Column::Title)
            .string()
            .not_null()
            .default("")
            .to_owned(),
        ColumnDef::new(post::Column::Content)
            .text()
            .not_null()
            .default("")
            .to_owned(),
        ColumnDef::new(post::Column::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .to_owned(),
        ColumnDef::new(post::Column::UpdatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .to_owned(),
    ];

    columns
        .into_iter()
        .map(|mut column| {
            Table::alter()
                .table(post::Entity.table_ref())
                .add_column_if_not_exists(&mut column)
                .to_owned()
        })
        .collect()
}
