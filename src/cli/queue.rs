//! Queue inspection: depth and dead letters.

use tabled::{Table, Tabled};

use crate::app::Services;
use crate::cli::output;
use crate::error::Result;

#[derive(Tabled)]
struct DeadLetterLine {
    #[tabled(rename = "Payload")]
    payload: String,
    #[tabled(rename = "Attempts")]
    attempts: u32,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Buried At")]
    buried_at: String,
}

pub async fn run(services: &Services) -> Result<()> {
    let depth = services.queue.depth().await?;
    let dead = services.queue.dead_letters().await?;

    output::section("Queue");
    output::key_value("Waiting", depth);
    output::key_value("Dead letters", dead.len());

    if !dead.is_empty() {
        output::section("Dead letters");
        let lines: Vec<DeadLetterLine> = dead
            .into_iter()
            .map(|d| DeadLetterLine {
                payload: d.payload,
                attempts: d.attempts,
                reason: d.reason,
                buried_at: d.buried_at.to_rfc3339(),
            })
            .collect();
        output::table(&Table::new(lines).to_string());
    }

    Ok(())
}
