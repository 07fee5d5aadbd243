//! In-memory guild used to exercise the backup engine in tests.

use serenity::{all::Permissions, async_trait};
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use crate::server::{
    error::AppError,
    model::{
        guild::{
            BotMember, ChannelSpec, GuildSettingChange, GuildState, LiveChannel, LiveRole,
            RoleSpec,
        },
        snapshot::ChannelKind,
    },
    service::backup::gateway::GuildGateway,
};

pub const GUILD_ID: u64 = 1000;

/// Position of the bot's own role in `guild_state()`.
pub const BOT_ROLE_POSITION: u16 = 50;

/// An empty guild where the bot is an administrator with a high role.
pub fn guild_state() -> GuildState {
    GuildState {
        guild_id: GUILD_ID,
        name: "Test Guild".to_string(),
        description: None,
        icon_ref: None,
        banner_ref: None,
        verification_level: 1,
        explicit_content_filter: 0,
        default_notifications: 1,
        afk_timeout_seconds: 300,
        afk_channel_id: None,
        system_channel_id: None,
        rules_channel_id: None,
        public_updates_channel_id: None,
        boost_tier: 0,
        boost_count: 0,
        roles: vec![role(GUILD_ID, "@everyone", 0)],
        channels: Vec::new(),
        emojis: Vec::new(),
        bot: BotMember {
            permissions: Permissions::ADMINISTRATOR,
            highest_role_position: BOT_ROLE_POSITION,
        },
    }
}

pub fn role(id: u64, name: &str, position: u16) -> LiveRole {
    LiveRole {
        id,
        name: name.to_string(),
        color: 0,
        hoisted: false,
        mentionable: false,
        managed: false,
        permission_set: 0,
        position,
    }
}

pub fn text_channel(id: u64, name: &str, position: u16, parent_id: Option<u64>) -> LiveChannel {
    LiveChannel {
        id,
        name: name.to_string(),
        kind: ChannelKind::Text,
        parent_id,
        position,
        topic: None,
        nsfw: false,
        bitrate: None,
        user_limit: None,
        slow_mode_seconds: 0,
        overrides: Vec::new(),
    }
}

pub fn category(id: u64, name: &str, position: u16) -> LiveChannel {
    LiveChannel {
        kind: ChannelKind::Category,
        ..text_channel(id, name, position, None)
    }
}

pub fn voice_channel(id: u64, name: &str, position: u16) -> LiveChannel {
    LiveChannel {
        kind: ChannelKind::Voice,
        bitrate: Some(64000),
        user_limit: Some(10),
        ..text_channel(id, name, position, None)
    }
}

/// Gateway over a mutable in-memory `GuildState`.
///
/// Created roles land at position 1 like they do on Discord. Names listed in
/// `failing_names` make role and channel mutations fail for that name.
pub struct FakeGateway {
    state: Mutex<GuildState>,
    next_id: AtomicU64,
    failing_names: HashSet<String>,
    mutations: AtomicU64,
}

impl FakeGateway {
    pub fn new(state: GuildState) -> Self {
        Self {
            state: Mutex::new(state),
            next_id: AtomicU64::new(5000),
            failing_names: HashSet::new(),
            mutations: AtomicU64::new(0),
        }
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    pub fn state(&self) -> GuildState {
        self.state.lock().unwrap().clone()
    }

    /// Changes the guild outside of the gateway, like another admin would.
    pub fn update(&self, change: impl FnOnce(&mut GuildState)) {
        let mut state = self.state.lock().unwrap();
        change(&mut *state);
    }

    /// Number of mutating calls received.
    pub fn mutations(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }

    fn check(&self, name: &str) -> Result<(), AppError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);

        if self.failing_names.contains(name) {
            return Err(AppError::InternalError(format!("Missing Access for {}", name)));
        }

        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildGateway for FakeGateway {
    async fn fetch_state(&self) -> Result<GuildState, AppError> {
        Ok(self.state())
    }

    async fn edit_guild(&self, change: &GuildSettingChange) -> Result<(), AppError> {
        self.check(change.label())?;

        let mut state = self.state.lock().unwrap();
        match change {
            GuildSettingChange::Name(name) => state.name = name.clone(),
            GuildSettingChange::Description(description) => {
                state.description = description.clone()
            }
            GuildSettingChange::VerificationLevel(level) => state.verification_level = *level,
            GuildSettingChange::ExplicitContentFilter(filter) => {
                state.explicit_content_filter = *filter
            }
            GuildSettingChange::DefaultNotifications(level) => {
                state.default_notifications = *level
            }
            GuildSettingChange::AfkTimeout(seconds) => state.afk_timeout_seconds = *seconds,
        }

        Ok(())
    }

    async fn edit_role(&self, role_id: u64, spec: &RoleSpec) -> Result<(), AppError> {
        self.check(&spec.name)?;

        let mut state = self.state.lock().unwrap();
        let role = state
            .roles
            .iter_mut()
            .find(|role| role.id == role_id)
            .ok_or_else(|| AppError::NotFound(format!("Unknown role {}", role_id)))?;

        role.color = spec.color;
        role.hoisted = spec.hoisted;
        role.mentionable = spec.mentionable;
        role.permission_set = spec.permission_set;

        Ok(())
    }

    async fn create_role(&self, spec: &RoleSpec) -> Result<LiveRole, AppError> {
        self.check(&spec.name)?;

        let created = LiveRole {
            id: self.next_id(),
            name: spec.name.clone(),
            color: spec.color,
            hoisted: spec.hoisted,
            mentionable: spec.mentionable,
            managed: false,
            permission_set: spec.permission_set,
            position: 1,
        };
        self.state.lock().unwrap().roles.push(created.clone());

        Ok(created)
    }

    async fn create_channel(&self, spec: &ChannelSpec) -> Result<LiveChannel, AppError> {
        self.check(&spec.name)?;

        let created = LiveChannel {
            id: self.next_id(),
            name: spec.name.clone(),
            kind: spec.kind,
            parent_id: spec.parent_id,
            position: spec.position,
            topic: spec.topic.clone(),
            nsfw: spec.nsfw,
            bitrate: spec.bitrate,
            user_limit: spec.user_limit,
            slow_mode_seconds: spec.slow_mode_seconds,
            overrides: spec.overrides.clone(),
        };
        self.state.lock().unwrap().channels.push(created.clone());

        Ok(created)
    }
}
