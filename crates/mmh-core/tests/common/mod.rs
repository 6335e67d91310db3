//! Recording test doubles for the host seams.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use mmh_core::catalog;
use mmh_core::{
    Composer, ConfirmPrompt, MemoryForm, Navigator, Notice, Notifier, RequestDescriptor,
    TemplateRegistry, Transport, TransportError, TransportResponse,
};
use mmh_model::{FieldDefaults, FormField, HostScope, SystemReasonIds, Template};
use serde_json::{Value, json};

pub const ORIGIN: &str = "https://stackoverflow.com";
pub const SENT_URL: &str = "https://stackoverflow.com/users/42/moderator-messages?sent";
pub const SYSTEM_FOOTER: &str = "Regards,\n\nStack Overflow Moderation Team";
pub const SYSTEM_REASONS: [&str; 5] = [
    "0",
    "ExcessiveSelfPromotion",
    "LowQualityQuestions",
    "OtherViolation",
    "Plagiarism",
];

/// One call made against the fake transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(RequestDescriptor),
    Post {
        path: String,
        fields: Vec<(String, String)>,
    },
    Resolve(String),
}

/// The payload the fake host returns for a system reason.
pub fn system_defaults(reason_id: &str) -> Value {
    json!({
        "MessageTemplate": {
            "TemplateName": reason_id,
            "TemplateBody": format!("Body for {reason_id}."),
            "Footer": SYSTEM_FOOTER,
            "DefaultSuspendDays": 7,
            "DefaultSuspensionReason": "for rule violations",
            "StackOverflowOnly": false,
            "IncludeSuspensionFooter": true
        },
        "ReasonId": reason_id
    })
}

/// Host double. Every path answers 200 unless configured otherwise.
#[derive(Debug, Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    statuses: HashMap<String, u16>,
    unreachable: Vec<String>,
}

impl FakeTransport {
    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }

    pub fn with_network_failure(mut self, path: &str) -> Self {
        self.unreachable.push(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<RequestDescriptor> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Get(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post { path, fields } => Some((path, fields)),
                _ => None,
            })
            .collect()
    }

    fn check(&self, path: &str) -> Result<u16, TransportError> {
        if self.unreachable.iter().any(|p| p == path) {
            return Err(TransportError::Network {
                path: path.to_string(),
                message: "connection reset".to_string(),
            });
        }
        Ok(self.statuses.get(path).copied().unwrap_or(200))
    }
}

impl Transport for FakeTransport {
    async fn get_json(&self, request: &RequestDescriptor) -> Result<FieldDefaults, TransportError> {
        self.calls.lock().unwrap().push(Call::Get(request.clone()));
        let status = self.check(&request.path)?;
        if status != 200 {
            return Err(TransportError::Status {
                path: request.path.clone(),
                status,
            });
        }
        let reason_id = request.query_value("reasonId").unwrap_or_default();
        Ok(FieldDefaults::from_value(system_defaults(reason_id)).unwrap())
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(Call::Post {
            path: path.to_string(),
            fields: fields.to_vec(),
        });
        let status = self.check(path)?;
        let url = if path == "/users/message/save" {
            SENT_URL.to_string()
        } else {
            format!("{ORIGIN}{path}")
        };
        Ok(TransportResponse {
            status,
            url,
            body: String::new(),
        })
    }

    async fn resolve_url(&self, path: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call::Resolve(path.to_string()));
        self.check(path)?;
        Ok(format!("{ORIGIN}{path}/display-name"))
    }
}

/// Notifier double answering every prompt with `answer`.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub answer: bool,
    toasts: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn toasts(&self) -> Vec<Notice> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, notice: Notice) {
        self.toasts.lock().unwrap().push(notice);
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt);
        self.answer
    }
}

/// Navigator double.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    navigations: Mutex<Vec<String>>,
    tabs: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn tabs(&self) -> Vec<String> {
        self.tabs.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }

    fn open_new_tab(&self, url: &str) {
        self.tabs.lock().unwrap().push(url.to_string());
    }
}

pub type TestComposer = Composer<FakeTransport, RecordingNotifier, RecordingNavigator, MemoryForm>;

pub fn scope() -> HostScope {
    HostScope::new(ORIGIN).with_site_name("Stack Overflow")
}

pub fn system_ids() -> SystemReasonIds {
    SystemReasonIds::from_options(SYSTEM_REASONS)
}

pub fn form() -> MemoryForm {
    MemoryForm::from_system_reasons(&system_ids())
        .with(FormField::AboutUserId, "42")
        .with(FormField::AntiForgeryToken, "fkey123")
}

/// A composer over the built-in catalog plus `extra` templates.
pub fn composer_with(
    extra: Vec<Template>,
    transport: FakeTransport,
    notifier: RecordingNotifier,
) -> TestComposer {
    let templates = catalog::builtin(&scope()).into_iter().chain(extra);
    let registry = TemplateRegistry::from_templates(templates).unwrap();
    Composer::new(
        registry,
        system_ids(),
        scope(),
        transport,
        notifier,
        RecordingNavigator::default(),
        form(),
    )
    .unwrap()
}

pub fn composer() -> TestComposer {
    composer_with(Vec::new(), FakeTransport::default(), RecordingNotifier::default())
}
