//! SQLite trade store implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use super::codec::{decimal_from_text, decimal_to_text, timestamp_from_text, timestamp_to_text};
use super::db::model::{NewPnlRow, NewTradeRow, PnlRow, PositionRow, TradeRow};
use super::db::schema::{pnl_records, positions, trades};
use super::db::{DbConn, DbPool};
use crate::domain::{NewTrade, PnlRecord, Position, ProcessedFill, Trade};
use crate::error::{Error, Result};
use crate::port::{CommitOutcome, TradeStore};

diesel::define_sql_function! {
    fn last_insert_rowid() -> BigInt;
}

/// SQLite-backed trade store.
///
/// All mutations for one processed trade run inside a single
/// `immediate_transaction` in [`commit_fill`](TradeStore::commit_fill).
pub struct SqliteTradeStore {
    pool: DbPool,
    #[cfg(any(test, feature = "testkit"))]
    fail_before_pnl_insert: std::sync::atomic::AtomicBool,
}

impl SqliteTradeStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            #[cfg(any(test, feature = "testkit"))]
            fail_before_pnl_insert: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Make the next `commit_fill` fail after the position fold but
    /// before the ledger insert, so tests can observe the rollback.
    #[cfg(any(test, feature = "testkit"))]
    pub fn fail_next_commit_before_pnl_insert(&self) {
        self.fail_before_pnl_insert
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn trade_from_row(row: TradeRow) -> Result<Trade> {
        Ok(Trade {
            id: row.id,
            instrument: row.instrument,
            side: row.side,
            quantity: row.quantity,
            price: decimal_from_text(&row.price)?,
            traded_at: timestamp_from_text(&row.traded_at)?,
            processed: row.processed,
        })
    }

    fn position_from_row(row: PositionRow) -> Result<Position> {
        Ok(Position {
            instrument: row.instrument,
            net_quantity: row.net_quantity,
            last_price: decimal_from_text(&row.last_price)?,
            exposure: decimal_from_text(&row.exposure)?,
            updated_at: timestamp_from_text(&row.updated_at)?,
        })
    }

    fn position_to_row(position: &Position) -> PositionRow {
        PositionRow {
            instrument: position.instrument.clone(),
            net_quantity: position.net_quantity,
            last_price: decimal_to_text(position.last_price),
            exposure: decimal_to_text(position.exposure),
            updated_at: timestamp_to_text(position.updated_at),
        }
    }

    fn pnl_from_row(row: PnlRow) -> Result<PnlRecord> {
        Ok(PnlRecord {
            id: row.id,
            trade_id: row.trade_id,
            instrument: row.instrument,
            direction: row.direction,
            quantity: row.quantity,
            trade_price: decimal_from_text(&row.trade_price)?,
            current_price: decimal_from_text(&row.current_price)?,
            pnl: decimal_from_text(&row.pnl)?,
            computed_at: timestamp_from_text(&row.computed_at)?,
        })
    }
}

#[async_trait]
impl TradeStore for SqliteTradeStore {
    async fn insert_trade(&self, new: &NewTrade) -> Result<Trade> {
        let row = NewTradeRow {
            instrument: new.instrument.clone(),
            side: new.side.clone(),
            quantity: new.quantity,
            price: decimal_to_text(new.price),
            traded_at: timestamp_to_text(Utc::now()),
            processed: false,
        };

        let mut conn = self.conn()?;
        let stored: TradeRow = conn.immediate_transaction(|conn| {
            diesel::insert_into(trades::table)
                .values(&row)
                .execute(conn)?;
            let id: i64 = diesel::select(last_insert_rowid()).get_result(conn)?;
            trades::table.find(id).first(conn)
        })?;

        Self::trade_from_row(stored)
    }

    async fn get_trade(&self, id: i64) -> Result<Option<Trade>> {
        let mut conn = self.conn()?;
        let row: Option<TradeRow> = trades::table.find(id).first(&mut conn).optional()?;
        row.map(Self::trade_from_row).transpose()
    }

    async fn list_trades(&self, limit: i64) -> Result<Vec<Trade>> {
        let mut conn = self.conn()?;
        let rows: Vec<TradeRow> = trades::table
            .order(trades::id.desc())
            .limit(limit)
            .load(&mut conn)?;
        rows.into_iter().map(Self::trade_from_row).collect()
    }

    async fn get_position(&self, instrument: &str) -> Result<Option<Position>> {
        let mut conn = self.conn()?;
        let row: Option<PositionRow> = positions::table
            .find(instrument)
            .first(&mut conn)
            .optional()?;
        row.map(Self::position_from_row).transpose()
    }

    async fn list_positions(&self) -> Result<Vec<Position>> {
        let mut conn = self.conn()?;
        let rows: Vec<PositionRow> = positions::table
            .order(positions::instrument.asc())
            .load(&mut conn)?;
        rows.into_iter().map(Self::position_from_row).collect()
    }

    async fn list_pnl(&self, limit: i64) -> Result<Vec<PnlRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<PnlRow> = pnl_records::table
            .order(pnl_records::id.desc())
            .limit(limit)
            .load(&mut conn)?;
        rows.into_iter().map(Self::pnl_from_row).collect()
    }

    async fn commit_fill(&self, fill: &ProcessedFill) -> Result<CommitOutcome> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, Error, _>(|conn| {
            // Re-check the flag inside the transaction: a redelivered copy
            // that raced past the processor's guard must not commit twice.
            let trade: Option<TradeRow> =
                trades::table.find(fill.trade_id).first(conn).optional()?;
            let Some(trade) = trade else {
                return Ok(CommitOutcome::TradeMissing);
            };
            if trade.processed {
                return Ok(CommitOutcome::AlreadyProcessed);
            }

            let existing: Option<PositionRow> = positions::table
                .find(&fill.instrument)
                .first(conn)
                .optional()?;
            let mut position = match existing {
                Some(row) => Self::position_from_row(row)?,
                None => Position::zeroed(&fill.instrument),
            };
            position.apply_fill(fill.quantity, fill.direction, fill.current_price);
            diesel::replace_into(positions::table)
                .values(Self::position_to_row(&position))
                .execute(conn)?;

            #[cfg(any(test, feature = "testkit"))]
            if self
                .fail_before_pnl_insert
                .swap(false, std::sync::atomic::Ordering::SeqCst)
            {
                return Err(Error::Database(
                    "injected failure before pnl insert".to_string(),
                ));
            }

            diesel::insert_into(pnl_records::table)
                .values(NewPnlRow {
                    trade_id: fill.trade_id,
                    instrument: fill.instrument.clone(),
                    direction: fill.direction,
                    quantity: fill.quantity,
                    trade_price: decimal_to_text(fill.trade_price),
                    current_price: decimal_to_text(fill.current_price),
                    pnl: decimal_to_text(fill.pnl),
                    computed_at: timestamp_to_text(Utc::now()),
                })
                .execute(conn)?;

            diesel::update(trades::table.find(fill.trade_id))
                .set(trades::processed.eq(true))
                .execute(conn)?;

            Ok(CommitOutcome::Committed(position))
        })
    }
}
