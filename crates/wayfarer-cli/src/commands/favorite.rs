//! Favorite command implementation.

use crate::cli::FavoriteArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the favorite command.
pub async fn execute_favorite(
    args: FavoriteArgs,
    session: &Session,
    formatter: &Formatter,
) -> Result<()> {
    let itinerary = session.require(&args.id)?;
    let is_favorite = session.store().toggle_favorite(&itinerary.id).await?;

    println!("{}", formatter.favorite_toggled(&itinerary, is_favorite));

    Ok(())
}
