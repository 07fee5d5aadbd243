//! Dispatch of slash commands and button clicks.
//!
//! Every interaction is deferred before any work starts so slow Discord calls don't
//! exceed the 3 second acknowledgement window. Errors are shown to the user as an
//! embed in place of the deferred response.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Interaction,
};

use crate::server::{
    bot::command::{backup, component::BackupAction, embed},
    error::AppError,
};

/// Handles the interaction_create event.
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) if command.data.name == backup::COMMAND_NAME => {
            handle_backup_command(db, &ctx, &command).await;
        }
        Interaction::Component(component) => {
            handle_component(db, &ctx, &component).await;
        }
        _ => {}
    }
}

async fn handle_backup_command(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) {
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to acknowledge /backup: {}", e);
        return;
    }

    if let Err(err) = backup::run(ctx, db, command).await {
        let reply = EditInteractionResponse::new()
            .embed(embed::error(&err))
            .components(Vec::new());

        if let Err(e) = command.edit_response(&ctx.http, reply).await {
            tracing::error!("Failed to send /backup error reply: {}", e);
        }
    }
}

async fn handle_component(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) {
    let Some((action, backup_id)) = BackupAction::parse(&interaction.data.custom_id) else {
        return;
    };

    // Confirm and Cancel belong to a waiting restore preview
    if action.is_confirmation() {
        return;
    }

    if let Err(e) = defer(ctx, interaction, action).await {
        tracing::error!("Failed to acknowledge backup button: {}", e);
        return;
    }

    if let Err(err) =
        backup::handle_action(ctx, db, interaction, action, &backup_id).await
    {
        let reply = EditInteractionResponse::new()
            .embed(embed::error(&err))
            .components(Vec::new());

        if let Err(e) = interaction.edit_response(&ctx.http, reply).await {
            tracing::error!("Failed to send backup button error reply: {}", e);
        }
    }
}

/// Shared backups are posted in the channel, every other reply is only visible to the
/// clicking user.
async fn defer(
    ctx: &Context,
    interaction: &ComponentInteraction,
    action: BackupAction,
) -> Result<(), AppError> {
    let ephemeral = action != BackupAction::Share;

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(ephemeral),
            ),
        )
        .await?;

    Ok(())
}
