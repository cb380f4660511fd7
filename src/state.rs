use crate::config::Config;
use crate::domain::ports::{BookingRepository, Clock, CompanyDirectory, TrainerDirectory};
use crate::domain::services::schedule_gate::ScheduleGate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub trainer_dir: Arc<dyn TrainerDirectory>,
    pub company_dir: Arc<dyn CompanyDirectory>,
    pub clock: Arc<dyn Clock>,
    pub schedule_gate: Arc<ScheduleGate>,
}
