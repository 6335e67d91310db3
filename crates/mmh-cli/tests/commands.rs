//! Command flows against a local stand-in for the site.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use mmh_cli::cli::{DeleteReasonArg, DeleteSockArgs, PreviewArgs, SendArgs};
use mmh_cli::commands::{render_defaults, run_delete_sock, run_preview, run_send, run_templates};
use mmh_cli::terminal::{TerminalNavigator, TerminalNotifier};
use mmh_core::{BanEvasionOutcome, Delivery, Settings, SubmitOutcome, ValidationError};
use serde_json::{Value, json};

type Fields = HashMap<String, String>;

/// User whose annotations the site refuses.
const UNANNOTATABLE_USER: u64 = 13;

#[derive(Clone, Default)]
struct Site {
    gets: Arc<Mutex<Vec<String>>>,
    posts: Arc<Mutex<Vec<(String, Fields)>>>,
}

impl Site {
    fn record(&self, path: String, fields: Fields) {
        self.posts.lock().unwrap().push((path, fields));
    }

    fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    fn posts(&self) -> Vec<(String, Fields)> {
        self.posts.lock().unwrap().clone()
    }
}

async fn defaults(State(site): State<Site>, Query(query): Query<Fields>) -> Json<Value> {
    let reason = query.get("reasonId").cloned().unwrap_or_default();
    site.gets.lock().unwrap().push(reason.clone());
    Json(json!({
        "MessageTemplate": {
            "TemplateName": reason,
            "TemplateBody": format!("Body for {reason}."),
            "Footer": "Regards,\n\nModerators",
            "DefaultSuspendDays": 7,
            "DefaultSuspensionReason": "for rule violations",
            "IncludeSuspensionFooter": true
        }
    }))
}

async fn save(State(site): State<Site>, Form(fields): Form<Fields>) -> Result<Redirect, StatusCode> {
    if fields.get("fkey").map(String::as_str) != Some("f") {
        return Err(StatusCode::FORBIDDEN);
    }
    let user = fields.get("userId").cloned().unwrap_or_default();
    site.record("/users/message/save".to_string(), fields);
    Ok(Redirect::to(&format!("/sent/{user}")))
}

async fn annotate(
    State(site): State<Site>,
    Path(user): Path<u64>,
    Form(fields): Form<Fields>,
) -> StatusCode {
    site.record(format!("/admin/users/{user}/annotate"), fields);
    if user == UNANNOTATABLE_USER {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

async fn delete(State(site): State<Site>, Path(user): Path<u64>, Form(fields): Form<Fields>) -> StatusCode {
    site.record(format!("/admin/users/{user}/delete"), fields);
    StatusCode::OK
}

async fn serve() -> (String, Site) {
    let site = Site::default();
    let router = Router::new()
        .route("/admin/template/defaults", get(defaults))
        .route("/users/message/save", post(save))
        .route("/sent/:user", get(|| async { "sent" }))
        .route("/admin/users/:user/annotate", post(annotate))
        .route("/admin/users/:user/delete", post(delete))
        .route("/users/7", get(|| async { Redirect::permanent("/profiles/7") }))
        .route("/users/42", get(|| async { Redirect::permanent("/profiles/42") }))
        .route("/profiles/:user", get(|| async { "profile" }))
        .with_state(site.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{address}"), site)
}

fn settings(origin: &str) -> Settings {
    let mut settings = Settings::default();
    settings.site.url = origin.to_string();
    settings.site.name = Some("Test Site".to_string());
    settings.site.fkey = Some("f".to_string());
    settings
}

fn notifier(answer: &str, assume_yes: bool) -> TerminalNotifier<Cursor<Vec<u8>>, Vec<u8>> {
    TerminalNotifier::new(Cursor::new(answer.as_bytes().to_vec()), Vec::new(), assume_yes)
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

fn send_args(user: u64, reason: &str, days: Option<u32>) -> SendArgs {
    SendArgs {
        user,
        reason: reason.to_string(),
        days,
        body_file: None,
        yes: false,
    }
}

#[tokio::test]
async fn test_send_custom_template_sends_then_annotates() {
    let (origin, site) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("body.md");
    fs::write(&body, "Suspended for {suspensionDurationDays} days.").unwrap();
    let mut args = send_args(42, "account sharing", Some(7));
    args.body_file = Some(body);
    let notifier = notifier("", false);
    let navigator = TerminalNavigator::new(Vec::new());

    let report = run_send(&settings(&origin), &args, &notifier, &navigator)
        .await
        .unwrap();

    let location = format!("{origin}/sent/42");
    assert_eq!(
        report.outcome,
        SubmitOutcome::Done {
            location: location.clone()
        }
    );
    assert!(report.is_success());
    assert_eq!(site.gets(), vec!["OtherViolation"]);

    let posts = site.posts();
    assert_eq!(posts.len(), 2);
    let (path, message) = &posts[0];
    assert_eq!(path, "/users/message/save");
    assert_eq!(message["reasonId"], "OtherViolation");
    assert_eq!(message["templateEdit"], "Suspended for 7 days.");
    assert_eq!(message["suspendDays"], "7");
    assert_eq!(message["userId"], "42");
    let (path, annotation) = &posts[1];
    assert_eq!(path, "/admin/users/42/annotate");
    assert_eq!(annotation["annotation"], "account sharing (content of previous entry)");
    assert_eq!(annotation["fkey"], "f");

    assert_eq!(text(navigator.into_output()), format!("Navigate: {location}\n"));
}

#[tokio::test]
async fn test_send_with_failed_annotation_asks_before_navigating() {
    let (origin, site) = serve().await;
    let notifier = notifier("n\n", false);
    let navigator = TerminalNavigator::new(Vec::new());

    let report = run_send(
        &settings(&origin),
        &send_args(UNANNOTATABLE_USER, "closing spam", Some(3)),
        &notifier,
        &navigator,
    )
    .await
    .unwrap();

    assert_eq!(
        report.outcome,
        SubmitOutcome::PartialFailure {
            location: format!("{origin}/sent/{UNANNOTATABLE_USER}"),
            navigated: false,
        }
    );
    assert!(!report.is_success());
    assert_eq!(site.posts().len(), 2);
    assert!(text(notifier.into_output()).contains("Annotation Failed"));
    assert!(text(navigator.into_output()).is_empty());
}

#[tokio::test]
async fn test_send_system_reason_posts_form_unchanged() {
    let (origin, site) = serve().await;
    let notifier = notifier("", false);
    let navigator = TerminalNavigator::new(Vec::new());

    let report = run_send(
        &settings(&origin),
        &send_args(42, "OtherViolation", None),
        &notifier,
        &navigator,
    )
    .await
    .unwrap();

    assert_eq!(report.outcome, SubmitOutcome::Delegated);
    assert_eq!(report.plain_location, Some(format!("{origin}/sent/42")));
    assert!(report.is_success());

    let posts = site.posts();
    assert_eq!(posts.len(), 1, "no annotation for a plain message");
    let (_, message) = &posts[0];
    assert_eq!(message["reasonId"], "OtherViolation");
    assert_eq!(
        message["templateEdit"],
        "Body for OtherViolation.\n\nRegards,  \nModerators"
    );
}

#[tokio::test]
async fn test_send_rejects_placeholders_before_any_post() {
    let (origin, site) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("body.md");
    fs::write(&body, "You posted {todo: link}.").unwrap();
    let mut args = send_args(42, "soliciting votes", Some(1));
    args.body_file = Some(body);
    let notifier = notifier("", false);
    let navigator = TerminalNavigator::new(Vec::new());

    let report = run_send(&settings(&origin), &args, &notifier, &navigator)
        .await
        .unwrap();

    assert!(matches!(
        report.outcome,
        SubmitOutcome::Rejected(ValidationError::IncompletePlaceholders { .. })
    ));
    assert!(site.posts().is_empty());
    assert!(text(notifier.into_output()).starts_with("error: It looks like there are incomplete placeholders"));
}

#[tokio::test]
async fn test_send_requires_fkey() {
    let (origin, site) = serve().await;
    let mut settings = settings(&origin);
    settings.site.fkey = None;

    let err = run_send(
        &settings,
        &send_args(42, "closing spam", Some(1)),
        &notifier("", false),
        &TerminalNavigator::new(Vec::new()),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("fkey"));
    assert!(site.gets().is_empty());
}

#[tokio::test]
async fn test_preview_unknown_template_is_rejected_locally() {
    let (origin, site) = serve().await;
    let notifier = notifier("", false);
    let args = PreviewArgs {
        reason: "no such template".to_string(),
    };

    let delivery = run_preview(&settings(&origin), &args, &notifier, &TerminalNavigator::new(Vec::new()))
        .await
        .unwrap();

    assert_eq!(delivery, Delivery::Rejected);
    assert!(site.gets().is_empty());
    assert_eq!(
        text(notifier.into_output()),
        "error: Mod Message Helper - Template with that name not found!\n"
    );
}

#[tokio::test]
async fn test_preview_custom_template_fetches_aliased_reason() {
    let (origin, site) = serve().await;
    let args = PreviewArgs {
        reason: "closing spam".to_string(),
    };

    let delivery = run_preview(
        &settings(&origin),
        &args,
        &notifier("", false),
        &TerminalNavigator::new(Vec::new()),
    )
    .await
    .unwrap();

    let Delivery::Apply(defaults) = delivery else {
        panic!("expected defaults, got {delivery:?}");
    };
    assert_eq!(site.gets(), vec!["OtherViolation"]);
    assert_eq!(defaults.template_name(), Some("closing spam"));
    assert_eq!(defaults.footer(), Some("Regards,\n\nModerators"));
    assert!(render_defaults(&defaults).unwrap().contains("\"TemplateName\": \"closing spam\""));
}

#[tokio::test]
async fn test_delete_sock_deletes_then_annotates_main() {
    let (origin, site) = serve().await;
    let args = DeleteSockArgs {
        sock: 7,
        main: 42,
        reason: DeleteReasonArg::BanEvasion,
        details: "Same IP and writing style".to_string(),
        annotation: "Sock of 42".to_string(),
        email: "sock@example.com".to_string(),
        real_name: String::new(),
        message_after: true,
        yes: true,
    };
    let navigator = TerminalNavigator::new(Vec::new());

    let outcome = run_delete_sock(&settings(&origin), &args, &notifier("", true), &navigator)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BanEvasionOutcome::Completed {
            message_url: Some("/users/message/create/42".to_string())
        }
    );
    let posts = site.posts();
    assert_eq!(posts.len(), 2);
    let (path, deletion) = &posts[0];
    assert_eq!(path, "/admin/users/7/delete");
    assert!(
        deletion["deleteReasonDetails"].starts_with(&format!(
            "Same IP and writing style\n\nMain Account:  {origin}/profiles/42\n"
        ))
    );
    assert!(deletion["deleteReasonDetails"].ends_with("sock@example.com"));
    assert!(deletion["deleteReason"].starts_with("This user was created to circumvent"));
    let (path, annotation) = &posts[1];
    assert_eq!(path, "/admin/users/42/annotate");
    assert_eq!(
        annotation["annotation"],
        format!("Sock of 42 | Deleted evasion account: {origin}/profiles/7 | Email: sock@example.com")
    );
    assert_eq!(
        text(navigator.into_output()),
        "Open: /users/message/create/42\n"
    );
}

#[tokio::test]
async fn test_delete_sock_declined_posts_nothing() {
    let (origin, site) = serve().await;
    let args = DeleteSockArgs {
        sock: 7,
        main: 42,
        reason: DeleteReasonArg::NoLongerWelcome,
        details: "Repeated abuse after suspension".to_string(),
        annotation: "Sock of 42".to_string(),
        email: String::new(),
        real_name: String::new(),
        message_after: false,
        yes: false,
    };

    let outcome = run_delete_sock(
        &settings(&origin),
        &args,
        &notifier("no\n", false),
        &TerminalNavigator::new(Vec::new()),
    )
    .await
    .unwrap();

    assert_eq!(outcome, BanEvasionOutcome::Declined);
    assert!(site.posts().is_empty());
}

#[test]
fn test_templates_hide_stack_overflow_only_elsewhere() {
    let table = run_templates(&settings("https://superuser.com"))
        .unwrap()
        .to_string();
    assert!(table.contains("account sharing"));
    assert!(!table.contains("ban evasion"));
    assert!(!table.contains("self tag burnination"));
    assert!(!table.contains("ChatGPT"));

    let table = run_templates(&Settings::default()).unwrap().to_string();
    assert!(table.contains("ban evasion"));
    assert!(table.contains("self tag burnination"));
}
