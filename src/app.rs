//! Page controller. Binds the registration and sign-in forms to the passkey
//! service, keeps each submit button busy while its flow runs and renders localized
//! results.
//!
//! Each form moves `idle → loading → (success | error) → idle`. A submit on a form
//! that is still loading is dropped, whether it came from a click or the Enter key;
//! the two forms never share state.

use crate::{
    app_lib::{AppError, Locale, Message, Transport},
    components::{AlertKind, FormView, StatusView},
    features::auth::{AuthResult, Ceremony, PasskeyService},
};
use tracing::debug;

/// What the startup probe found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Unsupported,
    Unavailable,
    Available,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Registration,
    Login,
}

impl Flow {
    fn in_progress(self) -> Message {
        match self {
            Self::Registration => Message::RegistrationInProgress,
            Self::Login => Message::LoginInProgress,
        }
    }

    fn succeeded(self, result: AuthResult, username: &str) -> Message {
        match self {
            Self::Registration => Message::RegistrationSucceeded,
            Self::Login => {
                Message::LoginSucceeded(result.username.unwrap_or_else(|| username.to_string()))
            }
        }
    }

    fn failed(self) -> Message {
        match self {
            Self::Registration => Message::RegistrationFailed,
            Self::Login => Message::LoginFailed,
        }
    }

    fn failed_with(self, detail: String) -> Message {
        match self {
            Self::Registration => Message::RegistrationFailedWith(detail),
            Self::Login => Message::LoginFailedWith(detail),
        }
    }
}

/// How a submit ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty username; nothing was sent.
    Invalid,
    /// The form was already running a flow; nothing changed.
    Busy,
    Succeeded,
    /// The server answered 2xx with `success: false`.
    Rejected,
    Failed,
}

/// Trims the raw input and rejects empty usernames.
///
/// # Errors
/// Returns `AppError::Validation` when nothing but whitespace was entered.
pub fn validate_username(raw: &str) -> Result<&str, AppError> {
    let username = raw.trim();
    if username.is_empty() {
        Err(AppError::Validation("username is required".to_string()))
    } else {
        Ok(username)
    }
}

pub struct App<T, C> {
    service: PasskeyService<T, C>,
    locale: Locale,
}

impl<T: Transport, C: Ceremony> App<T, C> {
    #[must_use]
    pub fn new(service: PasskeyService<T, C>, locale: Locale) -> Self {
        Self { service, locale }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Checks WebAuthn support and availability and renders exactly one banner.
    pub async fn probe(&self, status: &impl StatusView) -> Readiness {
        let readiness = if !self.service.is_supported() {
            Readiness::Unsupported
        } else if self.service.is_available().await {
            Readiness::Available
        } else {
            Readiness::Unavailable
        };

        let (kind, message) = match readiness {
            Readiness::Unsupported => (AlertKind::Error, Message::Unsupported),
            Readiness::Unavailable => (AlertKind::Error, Message::Unavailable),
            Readiness::Available => (AlertKind::Success, Message::Available),
        };
        status.show(kind, &message.localize(self.locale));

        readiness
    }

    pub async fn submit_registration(&self, form: &impl FormView) -> SubmitOutcome {
        self.submit(form, Flow::Registration).await
    }

    pub async fn submit_login(&self, form: &impl FormView) -> SubmitOutcome {
        self.submit(form, Flow::Login).await
    }

    /// Runs one flow for `form`. The button is released on every path.
    pub async fn submit(&self, form: &impl FormView, flow: Flow) -> SubmitOutcome {
        if form.is_loading() {
            debug!(?flow, "submit ignored, form busy");
            return SubmitOutcome::Busy;
        }

        let raw = form.username();
        let username = match validate_username(&raw) {
            Ok(username) => username,
            Err(err) => {
                debug!(?flow, error = %err, "submit rejected");
                self.render(form, AlertKind::Error, &Message::UsernameRequired);
                return SubmitOutcome::Invalid;
            }
        };

        form.set_loading(true);
        self.render(form, AlertKind::Info, &flow.in_progress());

        let result = match flow {
            Flow::Registration => self.service.register(username).await,
            Flow::Login => self.service.authenticate(username).await,
        };

        let outcome = match result {
            Ok(auth) if auth.success => {
                self.render(form, AlertKind::Success, &flow.succeeded(auth, username));
                form.clear_username();
                SubmitOutcome::Succeeded
            }
            Ok(_) => {
                self.render(form, AlertKind::Error, &flow.failed());
                SubmitOutcome::Rejected
            }
            Err(err) => {
                let detail = self.error_detail(&err);
                self.render(form, AlertKind::Error, &flow.failed_with(detail));
                SubmitOutcome::Failed
            }
        };

        form.set_loading(false);
        outcome
    }

    fn error_detail(&self, err: &AppError) -> String {
        let detail = err.to_string();
        if detail.trim().is_empty() {
            Message::UnknownError.localize(self.locale)
        } else {
            detail
        }
    }

    fn render(&self, view: &impl StatusView, kind: AlertKind, message: &Message) {
        view.show(kind, &message.localize(self.locale));
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::launch;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{App, Flow, Readiness};
    use crate::{
        app_lib::{AppConfig, AppError, FetchTransport, Message, build_info, logging},
        components::dom::{DomForm, DomStatus, LOGIN_FORM, REGISTER_FORM},
        features::auth::{BrowserCeremony, PasskeyService},
    };
    use anyhow::{Context, Result};
    use std::rc::Rc;
    use tracing::{error, info};
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Event, KeyboardEvent};

    type BrowserApp = App<FetchTransport, BrowserCeremony>;

    const STATUS_ID: &str = "app-status";

    /// Entry point: initializes logging, then starts the app once the DOM is parsed.
    pub fn launch() {
        let config = AppConfig::load();
        logging::init(&config.log_level);

        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            error!("Failed to initialize application: document not available");
            return;
        };

        let loading = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "loading");

        if loading {
            let on_ready = Closure::once(move |_event: Event| spawn_local(run(config)));
            if document
                .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
                .is_err()
            {
                error!("Failed to initialize application: cannot listen for DOMContentLoaded");
                return;
            }
            on_ready.forget();
        } else {
            spawn_local(run(config));
        }
    }

    async fn run(config: AppConfig) {
        if let Err(err) = initialize(config).await {
            error!("Failed to initialize application: {err:#}");
        }
    }

    async fn initialize(config: AppConfig) -> Result<()> {
        info!(build = %build_info::build_label(), "starting passkey web");

        let window = web_sys::window().context("window not available")?;
        let document = window.document().context("document not available")?;
        let locale = config.resolve_locale(window.navigator().language().as_deref());

        let service = PasskeyService::new(
            FetchTransport::new(config.api_base_url.clone()),
            BrowserCeremony,
        );
        let app = Rc::new(App::new(service, locale));

        let status = DomStatus::bind(&document, STATUS_ID).context("binding status banner")?;
        if app.probe(&status).await == Readiness::Unsupported {
            return Ok(());
        }

        wire_forms(&app, &document).context("binding forms")?;
        info!(%locale, "passkey forms ready");
        Ok(())
    }

    fn wire_forms(app: &Rc<BrowserApp>, document: &Document) -> Result<(), AppError> {
        let busy_label = Message::Processing.localize(app.locale());
        let register = Rc::new(DomForm::bind(document, REGISTER_FORM, busy_label.clone())?);
        let login = Rc::new(DomForm::bind(document, LOGIN_FORM, busy_label)?);

        wire_form(app, &register, Flow::Registration)?;
        wire_form(app, &login, Flow::Login)
    }

    /// Submits on button click and on Enter in the username input.
    fn wire_form(app: &Rc<BrowserApp>, form: &Rc<DomForm>, flow: Flow) -> Result<(), AppError> {
        let submit = {
            let app = Rc::clone(app);
            let form = Rc::clone(form);
            move || {
                let app = Rc::clone(&app);
                let form = Rc::clone(&form);
                spawn_local(async move {
                    app.submit(form.as_ref(), flow).await;
                });
            }
        };

        let on_click = {
            let submit = submit.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| submit())
        };
        form.button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|_| AppError::Config("Failed to attach click listener".into()))?;
        on_click.forget();

        let on_keypress = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit();
            }
        });
        form.input
            .add_event_listener_with_callback("keypress", on_keypress.as_ref().unchecked_ref())
            .map_err(|_| AppError::Config("Failed to attach keypress listener".into()))?;
        on_keypress.forget();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCeremony, FakeForm, FakeStatus, FakeTransport};
    use serde_json::json;

    fn app(transport: FakeTransport, ceremony: FakeCeremony) -> App<FakeTransport, FakeCeremony> {
        App::new(PasskeyService::new(transport, ceremony), Locale::En)
    }

    #[test]
    fn validate_username_trims_and_rejects_blank() {
        assert_eq!(validate_username("  alice ").unwrap(), "alice");
        assert!(matches!(validate_username("   "), Err(AppError::Validation(_))));
        assert!(matches!(validate_username(""), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn probe_renders_unsupported_banner() {
        let app = app(FakeTransport::new(), FakeCeremony::new().unsupported());
        let status = FakeStatus::new();

        assert_eq!(app.probe(&status).await, Readiness::Unsupported);
        assert_eq!(
            status.messages(),
            vec![(AlertKind::Error, "This browser does not support WebAuthn.".to_string())]
        );
    }

    #[tokio::test]
    async fn probe_renders_unavailable_and_available_banners() {
        let status = FakeStatus::new();
        let unavailable = app(FakeTransport::new(), FakeCeremony::new().probe_result(Ok(false)));
        assert_eq!(unavailable.probe(&status).await, Readiness::Unavailable);

        let available = app(FakeTransport::new(), FakeCeremony::new());
        assert_eq!(available.probe(&status).await, Readiness::Available);

        let kinds: Vec<_> = status.messages().into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![AlertKind::Error, AlertKind::Success]);
    }

    #[tokio::test]
    async fn rejected_registration_shows_plain_failure() {
        let transport = FakeTransport::new()
            .respond("/register/request", Ok(json!({"challenge": "Y2g"})))
            .respond("/register/response", Ok(json!({"success": false})));
        let app = app(transport, FakeCeremony::new());
        let form = FakeForm::new("carol");

        assert_eq!(app.submit_registration(&form).await, SubmitOutcome::Rejected);
        assert_eq!(
            form.last_message(),
            Some((AlertKind::Error, "Registration failed.".to_string()))
        );
        assert_eq!(form.username_value(), "carol");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn submit_on_busy_form_changes_nothing() {
        let transport = FakeTransport::new();
        let ceremony = FakeCeremony::new();
        let app = app(transport.clone(), ceremony.clone());
        let form = FakeForm::new("carol");
        form.set_loading(true);

        assert_eq!(app.submit_login(&form).await, SubmitOutcome::Busy);
        assert!(transport.paths().is_empty());
        assert!(ceremony.requested().is_empty());
        assert!(form.messages().is_empty());
        assert_eq!(form.loading_changes(), vec![true]);
        assert_eq!(form.username_value(), "carol");
    }

    #[tokio::test]
    async fn login_success_greets_submitted_name_when_server_omits_it() {
        let transport = FakeTransport::new()
            .respond("/login/request", Ok(json!({"challenge": "Y2g"})))
            .respond("/login/response", Ok(json!({"success": true})));
        let app = app(transport, FakeCeremony::new());
        let form = FakeForm::new(" dave ");

        assert_eq!(app.submit_login(&form).await, SubmitOutcome::Succeeded);
        assert_eq!(
            form.last_message(),
            Some((AlertKind::Success, "Signed in. Welcome, dave!".to_string()))
        );
    }

    #[tokio::test]
    async fn empty_error_text_falls_back_to_unknown_error() {
        let transport = FakeTransport::new().respond("/login/request", Ok(json!({"challenge": "Y2g"})));
        let app = App::new(
            PasskeyService::new(transport, FakeCeremony::new().reject("Error", "")),
            Locale::Ja,
        );
        let form = FakeForm::new("erin");

        assert_eq!(app.submit_login(&form).await, SubmitOutcome::Failed);
        assert_eq!(
            form.last_message(),
            Some((AlertKind::Error, "ログインに失敗しました: 不明なエラー".to_string()))
        );
    }
}
