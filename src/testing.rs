//! In-memory transport, authenticator and views for exercising the passkey flows
//! without a browser. Clones share state, so a test can keep a handle while the
//! service owns another.

use crate::{
    app_lib::{AppError, Transport},
    components::{AlertKind, FormView, StatusView},
    features::auth::{
        Ceremony,
        types::{
            AssertionResponseJson, AttestationResponseJson, AuthenticationResponseJson,
            RegistrationResponseJson,
        },
    },
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    rc::Rc,
};

type Scripted = Result<Value, AppError>;

/// Transport that answers from a per-path script and records every call.
#[derive(Clone, Debug, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<HashMap<String, VecDeque<Scripted>>>>,
    calls: Rc<RefCell<Vec<(String, Value)>>>,
}

impl FakeTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next answer for `path`.
    #[must_use]
    pub fn respond(self, path: &str, response: Scripted) -> Self {
        self.responses
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
        self
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(path, _)| path.clone()).collect()
    }

    #[must_use]
    pub fn bodies(&self) -> Vec<Value> {
        self.calls.borrow().iter().map(|(_, body)| body.clone()).collect()
    }
}

impl Transport for FakeTransport {
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AppError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        self.calls.borrow_mut().push((path.to_string(), body));

        let scripted = self
            .responses
            .borrow_mut()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(AppError::Transport {
                    status: 404,
                    body: format!("no scripted response for {path}"),
                })
            });

        serde_json::from_value(scripted?)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    }
}

#[derive(Debug)]
struct CeremonyState {
    supported: bool,
    probe: Result<bool, AppError>,
    rejection: Option<AppError>,
    probes: usize,
    created: Vec<Value>,
    requested: Vec<Value>,
}

/// Authenticator that succeeds with canned credentials unless told to reject.
#[derive(Clone, Debug)]
pub struct FakeCeremony {
    state: Rc<RefCell<CeremonyState>>,
}

impl Default for FakeCeremony {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(CeremonyState {
                supported: true,
                probe: Ok(true),
                rejection: None,
                probes: 0,
                created: Vec::new(),
                requested: Vec::new(),
            })),
        }
    }
}

impl FakeCeremony {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unsupported(self) -> Self {
        self.state.borrow_mut().supported = false;
        self
    }

    #[must_use]
    pub fn probe_result(self, result: Result<bool, AppError>) -> Self {
        self.state.borrow_mut().probe = result;
        self
    }

    /// Makes both ceremonies fail the way a dismissed platform dialog does.
    #[must_use]
    pub fn reject(self, name: &str, message: &str) -> Self {
        self.state.borrow_mut().rejection = Some(AppError::Ceremony {
            name: name.to_string(),
            message: message.to_string(),
        });
        self
    }

    #[must_use]
    pub fn probes(&self) -> usize {
        self.state.borrow().probes
    }

    /// Options passed to `create_credential`, in call order.
    #[must_use]
    pub fn created(&self) -> Vec<Value> {
        self.state.borrow().created.clone()
    }

    /// Options passed to `get_credential`, in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<Value> {
        self.state.borrow().requested.clone()
    }

    fn rejection(&self) -> Result<(), AppError> {
        match &self.state.borrow().rejection {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Ceremony for FakeCeremony {
    fn is_supported(&self) -> bool {
        self.state.borrow().supported
    }

    async fn platform_authenticator_available(&self) -> Result<bool, AppError> {
        let mut state = self.state.borrow_mut();
        state.probes += 1;
        state.probe.clone()
    }

    async fn create_credential(&self, options: &Value) -> Result<Value, AppError> {
        self.state.borrow_mut().created.push(options.clone());
        self.rejection()?;

        let credential = RegistrationResponseJson {
            id: "Y3JlZGVudGlhbA".to_string(),
            raw_id: "Y3JlZGVudGlhbA".to_string(),
            type_: "public-key".to_string(),
            response: AttestationResponseJson {
                client_data_json: "e30".to_string(),
                attestation_object: "o2NmbXRkbm9uZQ".to_string(),
                transports: vec!["internal".to_string()],
            },
            client_extension_results: json!({}),
            authenticator_attachment: Some("platform".to_string()),
        };
        serde_json::to_value(credential)
            .map_err(|err| AppError::Serialization(format!("Failed to encode attestation: {err}")))
    }

    async fn get_credential(&self, options: &Value) -> Result<Value, AppError> {
        self.state.borrow_mut().requested.push(options.clone());
        self.rejection()?;

        let credential = AuthenticationResponseJson {
            id: "Y3JlZGVudGlhbA".to_string(),
            raw_id: "Y3JlZGVudGlhbA".to_string(),
            type_: "public-key".to_string(),
            response: AssertionResponseJson {
                client_data_json: "e30".to_string(),
                authenticator_data: "YXV0aA".to_string(),
                signature: "c2ln".to_string(),
                user_handle: None,
            },
            client_extension_results: json!({}),
            authenticator_attachment: Some("platform".to_string()),
        };
        serde_json::to_value(credential)
            .map_err(|err| AppError::Serialization(format!("Failed to encode assertion: {err}")))
    }
}

/// Status area that remembers every banner it showed.
#[derive(Clone, Debug, Default)]
pub struct FakeStatus {
    messages: Rc<RefCell<Vec<(AlertKind, String)>>>,
}

impl FakeStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<(AlertKind, String)> {
        self.messages.borrow().clone()
    }
}

impl StatusView for FakeStatus {
    fn show(&self, kind: AlertKind, message: &str) {
        self.messages.borrow_mut().push((kind, message.to_string()));
    }
}

/// Form with an input value, a loading flag and a banner history.
#[derive(Clone, Debug, Default)]
pub struct FakeForm {
    input: Rc<RefCell<String>>,
    loading: Rc<Cell<bool>>,
    loading_changes: Rc<RefCell<Vec<bool>>>,
    status: FakeStatus,
}

impl FakeForm {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: Rc::new(RefCell::new(input.to_string())),
            ..Self::default()
        }
    }

    /// Current input value.
    #[must_use]
    pub fn username_value(&self) -> String {
        self.input.borrow().clone()
    }

    /// Every `set_loading` call, in order.
    #[must_use]
    pub fn loading_changes(&self) -> Vec<bool> {
        self.loading_changes.borrow().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<(AlertKind, String)> {
        self.status.messages()
    }

    #[must_use]
    pub fn last_message(&self) -> Option<(AlertKind, String)> {
        self.status.messages().pop()
    }
}

impl StatusView for FakeForm {
    fn show(&self, kind: AlertKind, message: &str) {
        self.status.show(kind, message);
    }
}

impl FormView for FakeForm {
    fn username(&self) -> String {
        self.input.borrow().clone()
    }

    fn clear_username(&self) {
        self.input.borrow_mut().clear();
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.loading_changes.borrow_mut().push(loading);
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }
}
