use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::services::email::Mailer;
use crate::store::Storage;

pub struct AppState {
    pub store: Arc<Mutex<Storage>>,
    pub config: AppConfig,
    pub mailer: Box<dyn Mailer>,
}
