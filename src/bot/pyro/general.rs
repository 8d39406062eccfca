//! General PyroBot commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::pyro::PyroData,
        errors::{Error, Result},
    };

    /// Check that the bot is responsive
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, PyroData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
