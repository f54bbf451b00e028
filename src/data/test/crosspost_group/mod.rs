use crate::{data::crosspost_group::CrosspostGroupRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory::crosspost_group::CrosspostGroupFactory};

mod get_by_user_id;
mod remove_channel;
