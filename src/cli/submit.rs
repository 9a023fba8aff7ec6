//! Trade submission: validate, book, enqueue.

use crate::app::Services;
use crate::cli::output;
use crate::cli::SubmitArgs;
use crate::domain::{NewTrade, Side};
use crate::error::Result;

pub async fn run(args: &SubmitArgs, services: &Services) -> Result<()> {
    let side: Side = args.side.parse().map_err(crate::error::Error::Domain)?;
    let new = NewTrade::new(&args.instrument, side, args.quantity, args.price)
        .map_err(crate::error::Error::Domain)?;

    let trade = services.store.insert_trade(&new).await?;
    output::ok(&format!(
        "booked trade #{}: {} {} {} @ {}",
        trade.id, trade.side, trade.quantity, trade.instrument, trade.price
    ));

    // The trade stays persisted even when the queue is down; the
    // worker picks it up after a manual re-enqueue.
    if let Err(err) = services.queue.enqueue(&trade.id.to_string()).await {
        output::warn(&format!("trade stored but queue unavailable: {err}"));
        return Err(err);
    }

    output::note(&format!(
        "queued for processing as {}",
        output::highlight(&trade.id.to_string())
    ));
    Ok(())
}
