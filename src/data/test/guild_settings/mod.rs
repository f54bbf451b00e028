use crate::{
    data::guild_settings::GuildSettingsRepository,
    error::AppError,
    model::settings::{RepostMode, DEFAULT_PAGE_LIMIT},
};
use futures::future::join_all;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory::guild_settings::GuildSettingsFactory};

mod create_default;
mod find_by_guild_id;
