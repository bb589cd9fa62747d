//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::{Month, OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{NewTransaction, Transaction},
    stores::{
        TransactionStore,
        transaction::{TransactionPage, TransactionQuery},
    },
};

/// Stores product sale transactions in a SQLite database.
///
/// Sale dates are stored as RFC 3339 strings. The month component is
/// denormalized into its own column at insert time so that the month filter
/// shared by every dashboard query is a plain indexed equality.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Replace the contents of the store with `transactions`.
    ///
    /// Runs the delete and all inserts in a single SQL transaction, so a
    /// failed replacement leaves the previous records in place. The row ID
    /// sequence is reset first, which keeps the assigned IDs identical across
    /// repeated seeds.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDateFormat] if a sale date cannot be formatted,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace_all(
        &mut self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error> {
        let connection = self.connection.lock().unwrap();

        let tx = connection.unchecked_transaction()?;

        tx.execute("DELETE FROM \"transaction\"", ())?;
        tx.execute(
            "UPDATE sqlite_sequence SET seq = 0 WHERE name = 'transaction'",
            (),
        )?;

        let mut stmt = tx.prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, sold, category, sale_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, title, description, price, date_of_sale, sold, category",
        )?;

        let mut inserted = Vec::with_capacity(transactions.len());

        for transaction in transactions {
            let date_of_sale = transaction.date_of_sale.format(&Rfc3339).map_err(|error| {
                Error::InvalidDateFormat(error.to_string(), transaction.date_of_sale.to_string())
            })?;

            let row = stmt.query_row(
                (
                    &transaction.title,
                    &transaction.description,
                    transaction.price,
                    date_of_sale,
                    transaction.sold,
                    &transaction.category,
                    u8::from(transaction.date_of_sale.month()),
                ),
                Self::map_row,
            )?;

            inserted.push(row);
        }

        drop(stmt);

        tx.commit()?;
        Ok(inserted)
    }

    /// Retrieve every transaction whose sale date falls in `month`, regardless
    /// of year.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_by_month(&self, month: Month) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, title, description, price, date_of_sale, sold, category
                 FROM \"transaction\" WHERE sale_month = :month",
            )?
            .query_map(&[(":month", &u8::from(month))], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve one page of transactions matching the month and search filter
    /// in `query`, along with the total count of matching records.
    ///
    /// The search text matches case-insensitively against the title, the
    /// description, and the textual form of the price. A page past the end of
    /// the data returns an empty list, not an error.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_page(&self, query: TransactionQuery) -> Result<TransactionPage, Error> {
        let mut where_clause_parts = vec!["sale_month = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(u8::from(query.month) as i64)];

        let search = query.search.trim();
        if !search.is_empty() {
            let n = query_parameters.len() + 1;
            where_clause_parts.push(format!(
                "(title LIKE ?{n} ESCAPE '\\' \
                 OR description LIKE ?{n} ESCAPE '\\' \
                 OR CAST(price AS TEXT) LIKE ?{n} ESCAPE '\\')"
            ));
            query_parameters.push(Value::Text(format!("%{}%", escape_like_pattern(search))));
        }

        let where_clause = where_clause_parts.join(" AND ");

        let connection = self.connection.lock().unwrap();

        let total: i64 = connection
            .prepare(&format!(
                "SELECT COUNT(id) FROM \"transaction\" WHERE {where_clause}"
            ))?
            .query_row(params_from_iter(query_parameters.iter()), |row| row.get(0))?;

        // Clamp the paging values to SQLite's signed 64-bit integer range.
        let transactions = connection
            .prepare(&format!(
                "SELECT id, title, description, price, date_of_sale, sold, category
                 FROM \"transaction\" WHERE {where_clause}
                 ORDER BY id ASC
                 LIMIT {} OFFSET {}",
                query.limit.min(i64::MAX as u64),
                query.offset.min(i64::MAX as u64)
            ))?
            .query_map(params_from_iter(query_parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransactionPage {
            transactions,
            total: total as u64,
        })
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    fn count(&self) -> Result<u32, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }
}

/// Escape the `%` and `_` wildcards in `search` so LIKE matches it literally.
fn escape_like_pattern(search: &str) -> String {
    search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL,
                    date_of_sale TEXT NOT NULL,
                    sold INTEGER NOT NULL,
                    category TEXT NOT NULL,
                    sale_month INTEGER NOT NULL
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS transaction_sale_month
             ON \"transaction\" (sale_month)",
            (),
        )?;

        // Ensure the sequence starts at 1
        connection.execute(
            "INSERT INTO sqlite_sequence (name, seq)
             SELECT 'transaction', 0
             WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let title = row.get(offset + 1)?;
        let description = row.get(offset + 2)?;
        let price = row.get(offset + 3)?;
        let raw_date: String = row.get(offset + 4)?;
        let sold = row.get(offset + 5)?;
        let category = row.get(offset + 6)?;

        let date_of_sale = OffsetDateTime::parse(&raw_date, &Rfc3339).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 4,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        Ok(Transaction {
            id,
            title,
            description,
            price,
            date_of_sale,
            sold,
            category,
        })
    }
}
