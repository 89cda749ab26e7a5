//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let itinerary = session.require(&args.id)?;
    println!("{}", formatter.format_itinerary(&itinerary)?);
    Ok(())
}
