use crate::server::{
    data::schedule::BackupScheduleRepository, error::AppError, model::schedule::Frequency,
};
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_all;
mod mark_run;
mod upsert;
