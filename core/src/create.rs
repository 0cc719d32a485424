//! Creation screen controller: validated draft, submit, navigate on success.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, SubmitError};
use crate::form::Form;
use crate::http::HttpResponse;
use crate::notify::{Notification, Outbox};
use crate::pending::{Completion, Latest, PendingRequest, Ticket};
use crate::route::Route;
use crate::types::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateState {
    Editing,
    Submitting,
    /// The store accepted the record and assigned this id.
    Created(String),
    Failed,
}

#[derive(Debug)]
pub struct CreateController<R: Resource> {
    client: ApiClient,
    form: Form,
    state: CreateState,
    latest: Latest,
    outbox: Outbox,
    submitted: Option<String>,
    navigation: Option<Route>,
    _record: std::marker::PhantomData<R>,
}

impl<R: Resource> CreateController<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: Form::new(R::FIELDS),
            state: CreateState::Editing,
            latest: Latest::default(),
            outbox: Outbox::default(),
            submitted: None,
            navigation: None,
            _record: std::marker::PhantomData,
        }
    }

    /// Raw input for one field; validity is recomputed immediately.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.form.set(name, value)
    }

    pub fn blur(&mut self, name: &str) -> bool {
        self.form.blur(name)
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.form.is_valid()
    }

    pub fn submit(&mut self) -> Result<PendingRequest, SubmitError> {
        let new = R::new_from_form(&self.form)?;
        let request = self.client.build_create::<R>(&new)?;
        let ticket = self.latest.issue();
        debug!(collection = R::COLLECTION, ?ticket, record = ?new, "create submitted");
        self.submitted = Some(R::describe(&new).to_string());
        self.state = CreateState::Submitting;
        Ok(PendingRequest { ticket, request })
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Completion {
        if !self.latest.settle(ticket) {
            debug!(collection = R::COLLECTION, ?ticket, "discarding stale create result");
            return Completion::Discarded;
        }

        match outcome.and_then(|response| self.client.parse_create(response)) {
            Ok(id) => {
                info!(collection = R::COLLECTION, %id, "record created");
                let label = self.submitted.take().unwrap_or_default();
                self.outbox.push(Notification::new(
                    format!("Added {} {label}", R::NOUN),
                    Duration::from_secs(2),
                ));
                self.navigation = Some(Route::detail::<R>(id.clone()));
                self.state = CreateState::Created(id);
            }
            Err(e) => {
                warn!(collection = R::COLLECTION, error = %e, "create failed");
                self.outbox.push(
                    Notification::new(
                        format!("Failed to add the {}", R::NOUN.to_lowercase()),
                        Duration::from_secs(5),
                    )
                    .with_action("OK"),
                );
                self.state = CreateState::Failed;
            }
        }
        Completion::Applied
    }

    pub fn teardown(&mut self) {
        self.latest.cancel();
    }

    pub fn state(&self) -> &CreateState {
        &self.state
    }

    /// Where to go after a successful create; handed out once.
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.take()
    }
}
