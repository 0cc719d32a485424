//! Detail screen controller: resolve one record from the navigation path.
//!
//! The only input is the record id. Whenever it changes, the previous lookup
//! is abandoned and the previous record is dropped at once, so the screen can
//! show a loading or not-found state but never a stale record under a new id.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::list::SERVER_PROBLEM;
use crate::notify::{Notification, Outbox};
use crate::pending::{Completion, Latest, PendingRequest, Ticket};
use crate::route::Route;
use crate::types::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState<R> {
    Idle,
    Loading,
    Found(R),
    NotFound,
    Errored,
}

#[derive(Debug)]
pub struct DetailController<R: Resource> {
    client: ApiClient,
    id: Option<String>,
    state: DetailState<R>,
    latest: Latest,
    outbox: Outbox,
}

impl<R: Resource> DetailController<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            id: None,
            state: DetailState::Idle,
            latest: Latest::default(),
            outbox: Outbox::default(),
        }
    }

    /// Track `id`. Issues a lookup only when the id differs from the one
    /// already tracked; re-announcing the same id is a no-op.
    pub fn show(&mut self, id: &str) -> Option<PendingRequest> {
        if self.id.as_deref() == Some(id) {
            return None;
        }
        self.id = Some(id.to_string());
        Some(self.reload_current())
    }

    /// Track the id of a navigation path. Paths that are not a detail route
    /// of this collection are ignored.
    pub fn navigate(&mut self, path: &str) -> Option<PendingRequest> {
        let route = Route::parse(path)?;
        let id = route.detail_id::<R>()?;
        self.show(id)
    }

    /// Look the tracked id up again, e.g. after an error.
    pub fn reload(&mut self) -> Option<PendingRequest> {
        self.id.as_ref()?;
        Some(self.reload_current())
    }

    fn reload_current(&mut self) -> PendingRequest {
        let id = self.id.as_deref().unwrap_or_default();
        let ticket = self.latest.issue();
        let request = self.client.build_get::<R>(id);
        debug!(collection = R::COLLECTION, id, ?ticket, "detail lookup issued");
        self.state = DetailState::Loading;
        PendingRequest { ticket, request }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Completion {
        if !self.latest.settle(ticket) {
            debug!(collection = R::COLLECTION, ?ticket, "discarding stale detail result");
            return Completion::Discarded;
        }

        self.state = match outcome.and_then(|response| self.client.parse_get::<R>(response)) {
            Ok(Some(record)) => DetailState::Found(record),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                warn!(collection = R::COLLECTION, id = ?self.id, error = %e, "detail lookup failed");
                self.outbox
                    .push(Notification::new(SERVER_PROBLEM, Duration::from_secs(3)).with_action("OK"));
                DetailState::Errored
            }
        };
        Completion::Applied
    }

    /// The screen is going away: ignore whatever is still in flight and
    /// forget the tracked id, so showing it again issues a fresh lookup.
    pub fn teardown(&mut self) {
        self.latest.cancel();
        self.id = None;
        if matches!(self.state, DetailState::Loading) {
            self.state = DetailState::Idle;
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> &DetailState<R> {
        &self.state
    }

    pub fn record(&self) -> Option<&R> {
        match &self.state {
            DetailState::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.take()
    }
}
