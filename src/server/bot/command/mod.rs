//! Slash commands and button flows.

pub mod backup;
pub mod component;
pub mod embed;

use serenity::{
    all::{CommandInteraction, ComponentInteraction, Context, EditInteractionResponse, Message},
    async_trait,
};

use crate::server::error::AppError;

/// An interaction whose deferred response can be edited.
///
/// Lets command and button flows share the same reply code.
#[async_trait]
pub trait Responder: Sync {
    async fn respond_with(
        &self,
        ctx: &Context,
        response: EditInteractionResponse,
    ) -> Result<Message, AppError>;
}

#[async_trait]
impl Responder for CommandInteraction {
    async fn respond_with(
        &self,
        ctx: &Context,
        response: EditInteractionResponse,
    ) -> Result<Message, AppError> {
        Ok(self.edit_response(&ctx.http, response).await?)
    }
}

#[async_trait]
impl Responder for ComponentInteraction {
    async fn respond_with(
        &self,
        ctx: &Context,
        response: EditInteractionResponse,
    ) -> Result<Message, AppError> {
        Ok(self.edit_response(&ctx.http, response).await?)
    }
}
