//! The `/backup` slash command and its buttons.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateAttachment,
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Permissions, ResolvedOption,
    ResolvedValue, UserId,
};
use std::time::Duration;

use crate::server::{
    bot::command::{component, component::BackupAction, embed, Responder},
    error::AppError,
    model::{schedule::Frequency, snapshot::SnapshotKind},
    service::{
        backup::{
            gateway::{GuildGateway, SerenityGuildGateway},
            BackupService,
        },
        schedule::BackupScheduleService,
    },
};

pub const COMMAND_NAME: &str = "backup";

/// How long a restore preview waits for Confirm or Cancel.
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(5 * 60);

const DESCRIPTION_MAX_LENGTH: u16 = 100;

/// A parsed `/backup` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackupCommand {
    Create {
        kind: SnapshotKind,
        description: Option<String>,
    },
    List,
    Restore {
        id: String,
        preview: bool,
    },
    Delete {
        id: String,
    },
    Info {
        id: String,
    },
    /// `None` disables the guild's schedule.
    Schedule {
        frequency: Option<Frequency>,
    },
}

impl BackupCommand {
    /// Parses the resolved options of a `/backup` interaction.
    pub fn parse(options: &[ResolvedOption<'_>]) -> Result<Self, AppError> {
        match options.first() {
            Some(ResolvedOption {
                name,
                value: ResolvedValue::SubCommand(args),
                ..
            }) => {
                let args: Vec<(&str, &ResolvedValue<'_>)> =
                    args.iter().map(|arg| (arg.name, &arg.value)).collect();

                Self::from_subcommand(name, &args)
            }
            _ => Err(AppError::BadRequest(
                "Choose one of the backup subcommands.".to_string(),
            )),
        }
    }

    fn from_subcommand(name: &str, args: &[(&str, &ResolvedValue<'_>)]) -> Result<Self, AppError> {
        let string = |key: &str| {
            args.iter().find_map(|(arg, value)| match value {
                ResolvedValue::String(s) if *arg == key => Some(s.trim().to_string()),
                _ => None,
            })
        };
        let boolean = |key: &str| {
            args.iter().find_map(|(arg, value)| match value {
                ResolvedValue::Boolean(b) if *arg == key => Some(*b),
                _ => None,
            })
        };
        let required = |key: &str| {
            string(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::BadRequest(format!("The `{}` option is required.", key)))
        };

        match name {
            "create" => {
                let kind = required("kind")?;
                let kind = kind
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Unknown backup type `{}`.", kind)))?;

                Ok(Self::Create {
                    kind,
                    description: string("description").filter(|d| !d.is_empty()),
                })
            }
            "list" => Ok(Self::List),
            "restore" => Ok(Self::Restore {
                id: required("id")?,
                preview: boolean("preview").unwrap_or(false),
            }),
            "delete" => Ok(Self::Delete {
                id: required("id")?,
            }),
            "info" => Ok(Self::Info {
                id: required("id")?,
            }),
            "schedule" => {
                let frequency = required("frequency")?;
                if frequency == "disable" {
                    return Ok(Self::Schedule { frequency: None });
                }

                let frequency = frequency.parse().map_err(|_| {
                    AppError::BadRequest(format!("Unknown frequency `{}`.", frequency))
                })?;

                Ok(Self::Schedule {
                    frequency: Some(frequency),
                })
            }
            other => Err(AppError::BadRequest(format!(
                "Unknown subcommand `{}`.",
                other
            ))),
        }
    }
}

/// Builds the global `/backup` command.
///
/// Only administrators see the command by default, and it can't be used in DMs.
pub fn register() -> CreateCommand {
    let kind = SnapshotKind::ALL.into_iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "kind", "What to back up")
            .required(true),
        |option, kind| option.add_string_choice(kind.label(), kind.as_str()),
    );
    let frequency = Frequency::ALL
        .into_iter()
        .fold(
            CreateCommandOption::new(
                CommandOptionType::String,
                "frequency",
                "How often to back up automatically",
            )
            .required(true),
            |option, frequency| option.add_string_choice(frequency.as_str(), frequency.as_str()),
        )
        .add_string_choice("disable", "disable");
    let id = || {
        CreateCommandOption::new(CommandOptionType::String, "id", "Backup ID").required(true)
    };
    let subcommand = |name: &str, description: &str| {
        CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
    };

    CreateCommand::new(COMMAND_NAME)
        .description("Back up and restore this server's roles, channels and settings")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .add_option(
            subcommand("create", "Create a backup of this server")
                .add_sub_option(kind)
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "description",
                        "A note to recognise this backup by",
                    )
                    .max_length(DESCRIPTION_MAX_LENGTH),
                ),
        )
        .add_option(subcommand("list", "List your backups of this server"))
        .add_option(
            subcommand("restore", "Restore a backup into this server")
                .add_sub_option(id())
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::Boolean,
                    "preview",
                    "Show what would change and ask for confirmation first",
                )),
        )
        .add_option(subcommand("delete", "Delete one of your backups").add_sub_option(id()))
        .add_option(subcommand("info", "Show details of one of your backups").add_sub_option(id()))
        .add_option(
            subcommand("schedule", "Create full backups of this server automatically")
                .add_sub_option(frequency),
        )
}

/// Runs a `/backup` invocation. The interaction must already be deferred.
pub async fn run(
    ctx: &Context,
    db: &DatabaseConnection,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Backups can only be managed in a server.".to_string()))?
        .get();
    let request = BackupCommand::parse(&command.data.options())?;
    let owner = command.user.id.get();

    tracing::debug!(
        "User {} ran /backup {:?} in guild {}",
        owner,
        request,
        guild_id
    );

    let gateway = SerenityGuildGateway::new(ctx.http.clone(), guild_id);
    let service = BackupService::new(db);

    let response = match request {
        BackupCommand::Create { kind, description } => {
            let snapshot = service.create(&gateway, owner, kind, description).await?;

            EditInteractionResponse::new()
                .embed(embed::created(&snapshot))
                .components(component::snapshot_actions(&snapshot.id))
        }
        BackupCommand::List => {
            let list = service.list(guild_id, owner).await?;
            let schedule = BackupScheduleService::new(db).get(guild_id).await?;

            EditInteractionResponse::new().embed(embed::list(&list, schedule.as_ref()))
        }
        BackupCommand::Restore { id, preview: true } => {
            return confirm_restore(ctx, command, &service, &gateway, &id, guild_id, owner).await;
        }
        BackupCommand::Restore { id, preview: false } => {
            let report = service.restore(&gateway, &id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::report(&report))
        }
        BackupCommand::Delete { id } => {
            service.delete(&id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::deleted(&id))
        }
        BackupCommand::Info { id } => {
            let snapshot = service.get(&id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::info(&snapshot))
        }
        BackupCommand::Schedule {
            frequency: Some(frequency),
        } => {
            let schedule = BackupScheduleService::new(db)
                .set(guild_id, owner, frequency)
                .await?;

            EditInteractionResponse::new().embed(embed::schedule_set(&schedule))
        }
        BackupCommand::Schedule { frequency: None } => {
            let removed = BackupScheduleService::new(db).disable(guild_id).await?;

            EditInteractionResponse::new().embed(embed::schedule_disabled(removed))
        }
    };

    command.respond_with(ctx, response).await?;

    Ok(())
}

/// Handles a click on one of the buttons attached to a new backup.
///
/// The interaction must already be deferred: publicly for Share, ephemerally otherwise.
pub async fn handle_action(
    ctx: &Context,
    db: &DatabaseConnection,
    interaction: &ComponentInteraction,
    action: BackupAction,
    backup_id: &str,
) -> Result<(), AppError> {
    let guild_id = interaction
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Backups can only be managed in a server.".to_string()))?
        .get();
    let owner = interaction.user.id.get();
    let service = BackupService::new(db);

    let response = match action {
        BackupAction::Download => {
            let archive = service.export(backup_id, guild_id, owner).await?;

            EditInteractionResponse::new()
                .content(format!("📦 Backup `{}`", backup_id))
                .new_attachment(CreateAttachment::bytes(archive.bytes, archive.file_name))
        }
        BackupAction::Restore => {
            let gateway = SerenityGuildGateway::new(ctx.http.clone(), guild_id);

            return confirm_restore(ctx, interaction, &service, &gateway, backup_id, guild_id, owner)
                .await;
        }
        BackupAction::Delete => {
            service.delete(backup_id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::deleted(backup_id))
        }
        BackupAction::Share => {
            let snapshot = service.get(backup_id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::shared(&snapshot, &interaction.user.name))
        }
        BackupAction::Info => {
            let snapshot = service.get(backup_id, guild_id, owner).await?;

            EditInteractionResponse::new().embed(embed::info(&snapshot))
        }
        BackupAction::Confirm | BackupAction::Cancel => return Ok(()),
    };

    interaction.respond_with(ctx, response).await?;

    Ok(())
}

/// Shows the restore plan and restores once the owner confirms.
///
/// Waits up to five minutes for the owner to click Confirm or Cancel. When the window
/// closes without an answer the buttons are disabled and nothing is restored.
async fn confirm_restore(
    ctx: &Context,
    responder: &dyn Responder,
    service: &BackupService<'_>,
    gateway: &dyn GuildGateway,
    backup_id: &str,
    guild_id: u64,
    owner: u64,
) -> Result<(), AppError> {
    let (snapshot, plan) = service.preview(gateway, backup_id, guild_id, owner).await?;

    let message = responder
        .respond_with(
            ctx,
            EditInteractionResponse::new()
                .embed(embed::plan(&snapshot, &plan))
                .components(component::confirm_actions(&snapshot.id, false)),
        )
        .await?;

    let Some(click) = message
        .await_component_interaction(&ctx.shard)
        .author_id(UserId::new(owner))
        .timeout(CONFIRM_TIMEOUT)
        .await
    else {
        tracing::debug!("Restore of backup {} expired unconfirmed", snapshot.id);

        responder
            .respond_with(
                ctx,
                EditInteractionResponse::new()
                    .embed(embed::confirmation_expired())
                    .components(component::confirm_actions(&snapshot.id, true)),
            )
            .await?;

        return Ok(());
    };

    let confirmed = matches!(
        BackupAction::parse(&click.data.custom_id),
        Some((BackupAction::Confirm, _))
    );

    if !confirmed {
        click
            .create_response(
                &ctx.http,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(embed::restore_cancelled())
                        .components(Vec::new()),
                ),
            )
            .await?;

        return Ok(());
    }

    click
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .embed(embed::restoring(&snapshot.id))
                    .components(Vec::new()),
            ),
        )
        .await?;

    let result = match service.restore(gateway, &snapshot.id, guild_id, owner).await {
        Ok(report) => embed::report(&report),
        Err(err) => embed::error(&err),
    };

    click
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(result))
        .await?;

    Ok(())
}
