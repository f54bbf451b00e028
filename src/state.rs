//! Services shared by every Discord event handler.

use std::sync::Arc;

use crate::service::{favourite::FavouriteService, post::PostService, settings::SettingsService};

/// Shared bot state, built once at startup and cloned into the event handler.
#[derive(Clone)]
pub struct BotState {
    /// Posting pipeline for guild messages.
    pub post: Arc<PostService>,
    /// Favourites driven by reactions on posted artworks.
    pub favourites: Arc<FavouriteService>,
    /// Settings service, used directly for guild bootstrap.
    pub settings: Arc<SettingsService>,
}

impl BotState {
    pub fn new(
        post: PostService,
        favourites: FavouriteService,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            post: Arc::new(post),
            favourites: Arc::new(favourites),
            settings,
        }
    }
}
