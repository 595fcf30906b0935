use std::sync::Arc;

use filmscout::FilmScout;

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub scout: Arc<FilmScout>,
    pub settings: Settings,
}
