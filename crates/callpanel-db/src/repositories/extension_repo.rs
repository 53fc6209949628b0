//! Extension directory over the PBX `extensions` table

use callpanel_core::{models::Extension, traits::ExtensionDirectory, AppError, AppResult};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of ExtensionDirectory
#[derive(Clone)]
pub struct PgExtensionDirectory {
    pool: PgPool,
}

impl PgExtensionDirectory {
    /// Create a new extension directory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExtensionDirectory for PgExtensionDirectory {
    #[instrument(skip(self))]
    async fn find_by_number(&self, number: &str) -> AppResult<Option<Extension>> {
        debug!("Finding extension by number: {}", number);

        // The password column is never read; the dashboard does not handle it
        let row = sqlx::query_as::<sqlx::Postgres, ExtensionRow>(
            r#"
            SELECT id, numero, bloqueio, nome, callerid, status, snystatus, stagente
            FROM extensions
            WHERE numero = $1
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding extension {}: {}", number, e);
            AppError::Database(format!("Failed to find extension: {}", e))
        })?;

        Ok(row.map(Into::into))
    }
}

/// Helper struct for mapping database rows to domain model
#[derive(Debug, sqlx::FromRow)]
struct ExtensionRow {
    id: i32,
    numero: String,
    bloqueio: Option<bool>,
    nome: Option<String>,
    callerid: Option<String>,
    status: Option<String>,
    snystatus: Option<String>,
    stagente: Option<String>,
}

impl From<ExtensionRow> for Extension {
    fn from(row: ExtensionRow) -> Self {
        Self {
            id: row.id,
            number: row.numero,
            // Only an explicit `true` blocks the extension
            blocked: row.bloqueio == Some(true),
            name: row.nome.unwrap_or_default(),
            caller_id: row.callerid,
            status: row.status,
            sny_status: row.snystatus,
            agent_status: row.stagente,
        }
    }
}
