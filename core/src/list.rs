//! List screen controller: remote fetch, local refinement, view mode.
//!
//! # Design
//! The controller is a state machine that never touches the network. Changing
//! the remote criteria (or refreshing) yields a `PendingRequest`; the host
//! executes it and reports back through `complete`. Only the newest ticket is
//! honoured, so a slow response to an older query can never replace the
//! result of a newer one. Local criteria and the view mode are applied to the
//! last server-filtered set in place and never produce a request.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::filter::filter_local;
use crate::http::HttpResponse;
use crate::notify::{Notification, Outbox};
use crate::pending::{Completion, Latest, PendingRequest, Ticket};
use crate::types::Resource;

pub(crate) const SERVER_PROBLEM: &str = "Problem contacting the server – try again";

/// How the displayed set is presented. Has no effect on its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Card,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug)]
pub struct ListController<R: Resource> {
    client: ApiClient,
    state: ListState,
    query: R::Query,
    filter: R::Filter,
    view_mode: ViewMode,
    server_filtered: Option<Vec<R>>,
    displayed: Vec<R>,
    latest: Latest,
    outbox: Outbox,
}

impl<R: Resource> ListController<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ListState::Idle,
            query: R::Query::default(),
            filter: R::Filter::default(),
            view_mode: ViewMode::default(),
            server_filtered: None,
            displayed: Vec::new(),
            latest: Latest::default(),
            outbox: Outbox::default(),
        }
    }

    /// Fetch with the current remote criteria, superseding any outstanding
    /// fetch. Called on initialisation and to reload.
    pub fn refresh(&mut self) -> PendingRequest {
        let ticket = self.latest.issue();
        self.state = ListState::Loading;
        debug!(collection = R::COLLECTION, ?ticket, query = ?self.query, "list fetch issued");
        PendingRequest {
            ticket,
            request: self.client.build_list::<R>(&self.query),
        }
    }

    /// Replace the remote criteria and fetch again.
    pub fn set_query(&mut self, query: R::Query) -> PendingRequest {
        self.query = query;
        self.refresh()
    }

    /// Replace the local criteria. Refines the last server result in place.
    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
        self.update_displayed();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.update_displayed();
    }

    /// Feed the outcome of a request issued by this controller.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Completion {
        if !self.latest.settle(ticket) {
            debug!(collection = R::COLLECTION, ?ticket, "discarding stale list result");
            return Completion::Discarded;
        }

        match outcome.and_then(|response| self.client.parse_list::<R>(response)) {
            Ok(records) => {
                debug!(collection = R::COLLECTION, count = records.len(), "list loaded");
                self.server_filtered = Some(records);
                self.state = ListState::Loaded;
                self.update_displayed();
            }
            Err(e) => {
                warn!(collection = R::COLLECTION, error = %e, "couldn't get the list; the server might be down");
                self.state = ListState::Errored;
                self.outbox
                    .push(Notification::new(SERVER_PROBLEM, Duration::from_secs(3)).with_action("OK"));
            }
        }
        Completion::Applied
    }

    /// The screen is going away: ignore whatever is still in flight.
    pub fn teardown(&mut self) {
        self.latest.cancel();
        if self.state == ListState::Loading {
            self.state = ListState::Idle;
        }
    }

    fn update_displayed(&mut self) {
        if let Some(records) = &self.server_filtered {
            self.displayed = filter_local(records, &self.filter);
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.latest.is_pending()
    }

    pub fn query(&self) -> &R::Query {
        &self.query
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Last set returned by the store, before local refinement.
    pub fn server_filtered(&self) -> Option<&[R]> {
        self.server_filtered.as_deref()
    }

    /// What the presentation layer renders.
    pub fn displayed(&self) -> &[R] {
        &self.displayed
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.take()
    }
}
