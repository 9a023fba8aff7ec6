//! Database row types for Diesel ORM.
//!
//! Decimals are stored as TEXT and parsed with `rust_decimal`;
//! timestamps are stored as RFC 3339 TEXT.

use diesel::prelude::*;

use super::schema::{dead_letters, pnl_records, positions, queue_items, trades};

/// Database row for a trade (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeRow {
    pub id: i64,
    pub instrument: String,
    pub side: String,
    pub quantity: i64,
    pub price: String,
    pub traded_at: String,
    pub processed: bool,
}

/// Database row for a trade (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = trades)]
pub struct NewTradeRow {
    pub instrument: String,
    pub side: String,
    pub quantity: i64,
    pub price: String,
    pub traded_at: String,
    pub processed: bool,
}

/// Database row for a position snapshot.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionRow {
    pub instrument: String,
    pub net_quantity: i64,
    pub last_price: String,
    pub exposure: String,
    pub updated_at: String,
}

/// Database row for a P&L ledger entry (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = pnl_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PnlRow {
    pub id: i64,
    pub trade_id: i64,
    pub instrument: String,
    pub direction: i64,
    pub quantity: i64,
    pub trade_price: String,
    pub current_price: String,
    pub pnl: String,
    pub computed_at: String,
}

/// Database row for a P&L ledger entry (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = pnl_records)]
pub struct NewPnlRow {
    pub trade_id: i64,
    pub instrument: String,
    pub direction: i64,
    pub quantity: i64,
    pub trade_price: String,
    pub current_price: String,
    pub pnl: String,
    pub computed_at: String,
}

/// Database row for a waiting queue item (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = queue_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QueueItemRow {
    pub id: i64,
    pub payload: String,
    pub attempts: i64,
    pub enqueued_at: String,
}

/// Database row for a waiting queue item (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = queue_items)]
pub struct NewQueueItemRow {
    pub payload: String,
    pub attempts: i64,
    pub enqueued_at: String,
}

/// Database row for a dead letter (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = dead_letters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeadLetterRow {
    pub id: i64,
    pub payload: String,
    pub attempts: i64,
    pub reason: String,
    pub buried_at: String,
}

/// Database row for a dead letter (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = dead_letters)]
pub struct NewDeadLetterRow {
    pub payload: String,
    pub attempts: i64,
    pub reason: String,
    pub buried_at: String,
}
