use crate::{data::user_settings::UserSettingsRepository, error::AppError};
use test_utils::{
    builder::TestBuilder,
    factory::{self, user_settings::UserSettingsFactory},
};

mod find_by_user_id;
