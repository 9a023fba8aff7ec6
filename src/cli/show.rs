//! Read views: trades, positions, and the P&L ledger as tables.

use tabled::{Table, Tabled};

use crate::app::Services;
use crate::cli::output;
use crate::error::Result;

#[derive(Tabled)]
struct TradeLine {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Processed")]
    processed: &'static str,
}

pub async fn trades(services: &Services, limit: i64) -> Result<()> {
    let trades = services.store.list_trades(limit).await?;
    if trades.is_empty() {
        output::note("No trades booked");
        return Ok(());
    }

    output::section("Trades");
    let lines: Vec<TradeLine> = trades
        .into_iter()
        .map(|t| TradeLine {
            id: t.id,
            instrument: t.instrument,
            side: t.side,
            quantity: t.quantity,
            price: t.price.to_string(),
            processed: if t.processed { "yes" } else { "no" },
        })
        .collect();
    output::table(&Table::new(lines).to_string());
    Ok(())
}

#[derive(Tabled)]
struct PositionLine {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Net Qty")]
    net_quantity: i64,
    #[tabled(rename = "Last Price")]
    last_price: String,
    #[tabled(rename = "Exposure")]
    exposure: String,
}

pub async fn positions(services: &Services) -> Result<()> {
    let positions = services.store.list_positions().await?;
    if positions.is_empty() {
        output::note("No positions yet");
        return Ok(());
    }

    output::section("Positions");
    let lines: Vec<PositionLine> = positions
        .into_iter()
        .map(|p| PositionLine {
            instrument: p.instrument,
            net_quantity: p.net_quantity,
            last_price: p.last_price.to_string(),
            exposure: p.exposure.to_string(),
        })
        .collect();
    output::table(&Table::new(lines).to_string());
    Ok(())
}

#[derive(Tabled)]
struct PnlLine {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Trade")]
    trade_id: i64,
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Dir")]
    direction: i64,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Trade Px")]
    trade_price: String,
    #[tabled(rename = "Current Px")]
    current_price: String,
    #[tabled(rename = "PnL")]
    pnl: String,
}

pub async fn pnl(services: &Services, limit: i64) -> Result<()> {
    let records = services.store.list_pnl(limit).await?;
    if records.is_empty() {
        output::note("No P&L records yet");
        return Ok(());
    }

    output::section("P&L ledger");
    let lines: Vec<PnlLine> = records
        .into_iter()
        .map(|r| PnlLine {
            id: r.id,
            trade_id: r.trade_id,
            instrument: r.instrument,
            direction: r.direction,
            quantity: r.quantity,
            trade_price: r.trade_price.to_string(),
            current_price: r.current_price.to_string(),
            pnl: r.pnl.to_string(),
        })
        .collect();
    output::table(&Table::new(lines).to_string());
    Ok(())
}
