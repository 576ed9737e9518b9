// src/dashboard/controller.rs
use tracing::{debug, warn};

use super::state::{LoadState, NavTab, PredictorState};
use crate::api::{ApiError, HrApiClient, Job};
use crate::session::{Session, SessionError, SessionStore};

pub const MSG_MISSING_FIELDS: &str = "Description et titre du poste sont obligatoires.";
pub const MSG_SERVER_UNREACHABLE: &str =
    "Erreur serveur — vérifiez que le backend est démarré.";
pub const MSG_UNKNOWN: &str = "Erreur inconnue.";

/// Owns all client-side dashboard state and drives it against the HR API:
/// session, navigation, the skill and job lists, the active skill filter and
/// the salary predictor. All mutation happens through `&mut self` on one
/// task, so state is only ever torn at await points, never mid-update.
pub struct DashboardController {
    client: HrApiClient,
    session: Session,
    pub nav: NavTab,
    pub skills: LoadState<Vec<String>>,
    pub jobs: LoadState<Vec<Job>>,
    /// Jobs currently shown, either the full list or a skill-scoped fetch.
    pub filtered_jobs: Vec<Job>,
    /// `None` means no filter. The label can outlive an empty result set when
    /// the scoped fetch fails.
    pub active_skill: Option<String>,
    pub predictor: PredictorState,
    filter_seq: u64,
    filter_applied: u64,
}

impl DashboardController {
    pub fn new(client: HrApiClient, session: Session) -> Self {
        Self {
            client,
            session,
            nav: NavTab::Dashboard,
            skills: LoadState::Loading,
            jobs: LoadState::Loading,
            filtered_jobs: Vec::new(),
            active_skill: None,
            predictor: PredictorState::default(),
            filter_seq: 0,
            filter_applied: 0,
        }
    }

    /// View activation: guard on the stored session, then run the initial
    /// load. Without a session this returns before any request goes out.
    pub async fn activate(
        store: &SessionStore,
        client: HrApiClient,
    ) -> Result<Self, SessionError> {
        let session = store.require()?;
        let mut controller = Self::new(client, session);
        controller.refresh().await;
        Ok(controller)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_nav(&mut self, tab: NavTab) {
        self.nav = tab;
    }

    /// Fetch the skill and job lists concurrently, replacing whatever was
    /// loaded before. List failures degrade to an empty rendering and are
    /// only logged; the user is never shown a read-path error.
    pub async fn refresh(&mut self) {
        self.skills = LoadState::Loading;
        self.jobs = LoadState::Loading;
        self.active_skill = None;

        let token = &self.session.token;
        let (skills, jobs) = tokio::join!(self.client.skills(token), self.client.jobs(token));

        self.skills = match skills {
            Ok(items) => LoadState::Loaded(items),
            Err(err) => {
                warn!("Skill list fetch failed: {}", err);
                LoadState::Failed(err.to_string())
            }
        };

        match jobs {
            Ok(items) => {
                self.filtered_jobs = items.clone();
                self.jobs = LoadState::Loaded(items);
            }
            Err(err) => {
                warn!("Job list fetch failed: {}", err);
                self.filtered_jobs.clear();
                self.jobs = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Toggle semantics: applying the active skill again clears the filter
    /// without a network call, anything else fetches the scoped list.
    pub async fn apply_filter(&mut self, skill: &str) {
        if self.active_skill.as_deref() == Some(skill) {
            self.clear_filter();
            return;
        }

        self.active_skill = Some(skill.to_string());
        self.filter_seq += 1;
        let seq = self.filter_seq;

        let result = self.client.jobs_by_skill(&self.session.token, skill).await;

        // A newer request finished first; this response is stale.
        if seq < self.filter_applied {
            debug!("Discarding stale filter response (seq {})", seq);
            return;
        }
        self.filter_applied = seq;

        self.filtered_jobs = match result {
            Ok(items) => items,
            Err(err) => {
                warn!("Filter fetch for {:?} failed: {}", skill, err);
                Vec::new()
            }
        };
    }

    pub fn clear_filter(&mut self) {
        self.active_skill = None;
        self.filtered_jobs = self.jobs.items().to_vec();
    }

    /// Skill card / top-skill click: filter by the skill and land on Jobs.
    pub async fn select_skill(&mut self, skill: &str) {
        self.apply_filter(skill).await;
        self.nav = NavTab::Jobs;
    }

    /// Submit the prediction form. Description and role are required before
    /// anything goes over the wire; every completion path, success or not,
    /// leaves `predicting` false.
    pub async fn predict(&mut self) {
        if self.predictor.form.job_description.is_empty() || self.predictor.form.role.is_empty() {
            self.predictor.error = Some(MSG_MISSING_FIELDS.to_string());
            return;
        }

        self.predictor.predicting = true;
        self.predictor.error = None;
        self.predictor.result = None;

        match self
            .client
            .predict(&self.session.token, &self.predictor.form)
            .await
        {
            Ok(salary) => self.predictor.result = Some(salary),
            Err(ApiError::Rejected { detail, .. }) => {
                self.predictor.error = Some(detail.unwrap_or_else(|| MSG_UNKNOWN.to_string()));
            }
            Err(ApiError::Transport(err)) => {
                warn!("Prediction request failed: {}", err);
                self.predictor.error = Some(MSG_SERVER_UNREACHABLE.to_string());
            }
        }

        self.predictor.predicting = false;
    }
}
