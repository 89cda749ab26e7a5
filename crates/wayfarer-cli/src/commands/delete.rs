//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use std::io::{self, BufRead, Write};

/// Execute the delete command.
pub async fn execute_delete(
    args: DeleteArgs,
    session: &Session,
    formatter: &Formatter,
) -> Result<()> {
    let itinerary = session.require(&args.id)?;

    // Confirm deletion unless --yes is specified
    if !args.yes {
        print!(
            "Delete '{}' ({})? [y/N] ",
            itinerary.title, itinerary.destination
        );
        io::stdout().flush()?;

        if !confirmed(io::stdin().lock())? {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    session.store().delete(&itinerary.id).await?;
    println!(
        "{}",
        formatter.success(&format!("Deleted itinerary '{}'", itinerary.title))
    );

    Ok(())
}

/// Read one answer line and accept only "y" or "yes".
fn confirmed(mut input: impl BufRead) -> Result<bool> {
    let mut response = String::new();
    input.read_line(&mut response)?;
    let answer = response.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
