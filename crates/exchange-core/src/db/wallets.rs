//! Database operations for stored wallets.

use crate::types::WalletRecord;
use crate::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Repository for wallet records.
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or update a wallet, keyed by address.
    ///
    /// Records without an id are assigned a fresh one. Returns the id the
    /// row is stored under, which is the existing id when the address was
    /// already present.
    pub async fn upsert(&self, record: &WalletRecord) -> Result<Uuid> {
        let id = record.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query(
            r#"
            INSERT INTO wallets (id, address, private_key, admin, operator)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (address) DO UPDATE SET
                private_key = EXCLUDED.private_key,
                admin = EXCLUDED.admin,
                operator = EXCLUDED.operator,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&record.address)
        .bind(&record.private_key)
        .bind(record.admin)
        .bind(record.operator)
        .fetch_one(&self.pool)
        .await?;

        let stored: Uuid = row.get("id");
        tracing::info!(id = %stored, address = %record.address, "Stored wallet");
        Ok(stored)
    }

    /// Get a wallet by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<WalletRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, address, private_key, admin, operator
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(record_from_row))
    }

    /// Get a wallet by address, ignoring checksum case.
    pub async fn get_by_address(&self, address: &str) -> Result<Option<WalletRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, address, private_key, admin, operator
            FROM wallets
            WHERE LOWER(address) = LOWER($1)
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(record_from_row))
    }

    /// Wallets flagged as exchange admins.
    pub async fn list_admins(&self) -> Result<Vec<WalletRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, address, private_key, admin, operator
            FROM wallets
            WHERE admin = TRUE
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(record_from_row).collect())
    }

    /// Wallets allowed to operate the exchange (submit settlements).
    pub async fn list_operators(&self) -> Result<Vec<WalletRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, address, private_key, admin, operator
            FROM wallets
            WHERE operator = TRUE
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(record_from_row).collect())
    }

    /// Delete a wallet. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn record_from_row(r: PgRow) -> WalletRecord {
    WalletRecord {
        id: Some(r.get("id")),
        address: r.get("address"),
        private_key: r.get("private_key"),
        admin: r.get("admin"),
        operator: r.get("operator"),
    }
}
