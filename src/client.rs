//! Send pipeline.
//!
//! Ties the pieces together for one request: resolve secrets for each scope,
//! merge scopes, assemble, send, record history. The transport outcome is
//! returned unchanged; history failures are logged and never surface.

use crate::assembler::{assemble, AssemblyError};
use crate::executor::{Transport, TransportError};
use crate::history::{HistoryEntry, HistoryRecorder};
use crate::models::{Collection, Environment, HttpResponse, RequestTemplate, Workspace};
use crate::variables::{resolve_variables, ScopeSet, SecretStore, VariableScope};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors returned by [`RequestClient::send`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The template could not be turned into a request. Nothing was sent.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// The request was sent but no response came back.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Everything needed to send one template.
///
/// Scopes that do not apply (no active environment, request outside any
/// collection) are `None`.
#[derive(Debug, Clone, Copy)]
pub struct SendContext<'a> {
    pub template: &'a RequestTemplate,
    pub workspace: Option<&'a Workspace>,
    pub environment: Option<&'a Environment>,
    pub collection: Option<&'a Collection>,
    /// Workspace the history entry is filed under.
    pub workspace_id: &'a str,
}

impl<'a> SendContext<'a> {
    /// Context for a template sent within `workspace` and no other scope.
    pub fn new(template: &'a RequestTemplate, workspace: &'a Workspace) -> Self {
        Self {
            template,
            workspace: Some(workspace),
            environment: None,
            collection: None,
            workspace_id: &workspace.id,
        }
    }

    pub fn with_environment(mut self, environment: &'a Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_collection(mut self, collection: &'a Collection) -> Self {
        self.collection = Some(collection);
        self
    }
}

/// Sends templates through a transport and records each attempt.
pub struct RequestClient<T: Transport, H: HistoryRecorder> {
    transport: T,
    history: H,
    secrets: Arc<dyn SecretStore>,
}

impl<T: Transport, H: HistoryRecorder> RequestClient<T, H> {
    pub fn new(transport: T, history: H, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            transport,
            history,
            secrets,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Builds the four variable scopes for `ctx`, with secrets resolved.
    pub fn scopes(&self, ctx: &SendContext<'_>) -> ScopeSet {
        let store = self.secrets.as_ref();
        let mut scopes = ScopeSet::new();

        if let Some(workspace) = ctx.workspace {
            scopes = scopes.with_scope(
                VariableScope::Workspace,
                resolve_variables(&workspace.variables, store),
            );
        }
        if let Some(environment) = ctx.environment {
            scopes = scopes.with_scope(
                VariableScope::Environment,
                resolve_variables(&environment.variables, store),
            );
        }
        if let Some(collection) = ctx.collection {
            scopes = scopes.with_scope(
                VariableScope::Collection,
                resolve_variables(&collection.variables, store),
            );
        }

        scopes.with_scope(
            VariableScope::Request,
            resolve_variables(&ctx.template.variables, store),
        )
    }

    /// Assembles and sends `ctx.template`.
    ///
    /// Every attempt is recorded in history, including ones that fail to
    /// assemble (which never reach the transport) and ones that get no
    /// response. Only responses fill in status, duration and size.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Assembly`] if the template cannot be assembled
    /// - [`ClientError::Transport`] if the request got no response
    pub async fn send(&self, ctx: &SendContext<'_>) -> Result<HttpResponse, ClientError> {
        let template = ctx.template;
        let entry = HistoryEntry::new(
            &template.id,
            &template.name,
            template.method,
            &template.url,
            ctx.workspace_id,
        );

        let variables = self.scopes(ctx).merged();
        let request = match assemble(template, &variables) {
            Ok(request) => request,
            Err(e) => {
                warn!("Request '{}' could not be assembled", template.name);
                self.record(&entry);
                return Err(e.into());
            }
        };

        let start = Instant::now();
        let result = self.transport.execute(&request).await;

        match &result {
            Ok(response) => {
                debug!(
                    "Request '{}' returned {} in {}",
                    template.name,
                    response.status_code,
                    response.formatted_duration()
                );
                self.record(&entry.with_response(response));
            }
            Err(e) => {
                warn!("Request '{}' failed: {}", template.name, e);
                let mut failed = entry;
                failed.duration_ms = start.elapsed().as_millis() as u64;
                self.record(&failed);
            }
        }

        result.map_err(ClientError::from)
    }

    fn record(&self, entry: &HistoryEntry) {
        if let Err(e) = self.history.record(entry) {
            warn!("Failed to record history entry: {}", e);
        }
    }
}
