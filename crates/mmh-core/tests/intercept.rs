//! Integration tests for template selection and interception.

mod common;

use common::{
    FakeTransport, RecordingNavigator, RecordingNotifier, SYSTEM_FOOTER, SYSTEM_REASONS, composer,
    composer_with, form, scope, system_defaults, system_ids,
};
use mmh_core::{
    Composer, ComposerAction, ComposerOutcome, Delivery, FormAdapter, FormView, NoticeKind,
    RegistryError, TemplateRegistry,
};
use mmh_model::{FieldDefaults, FormField, Template};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_system_reasons_pass_through_with_footer_normalized() {
    for reason_id in SYSTEM_REASONS.iter().filter(|id| **id != "0") {
        let mut composer = composer();
        let delivery = composer.select_reason(reason_id).await.unwrap();

        let mut expected = FieldDefaults::from_value(system_defaults(reason_id)).unwrap();
        expected.set_footer("Regards,  \nStack Overflow Moderation Team");
        assert_eq!(delivery, Delivery::Apply(expected), "{reason_id}");

        let gets = composer.transport().gets();
        assert_eq!(gets.len(), 1);
        assert_eq!(gets[0].query_value("reasonId"), Some(*reason_id));
        assert!(composer.notifier().toasts().is_empty());
    }
}

#[tokio::test]
async fn test_blank_option_fetches_nothing() {
    let mut composer = composer();
    let delivery = composer.select_reason("0").await.unwrap();
    assert_eq!(delivery, Delivery::Skipped);
    assert!(composer.transport().calls().is_empty());
}

#[tokio::test]
async fn test_custom_template_substituted_and_merged() {
    let mut composer = composer();
    composer.initialize("/users/message/create/42").await.unwrap();
    let Delivery::Apply(defaults) = composer.select_reason("soliciting votes").await.unwrap() else {
        panic!("expected defaults to be applied");
    };

    let gets = composer.transport().gets();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].path, "/admin/template/defaults");
    assert_eq!(gets[0].query_value("reasonId"), Some("OtherViolation"));

    assert_eq!(defaults.template_name(), Some("soliciting votes"));
    assert!(defaults.template_body().unwrap().starts_with("We noticed that you've been posting"));
    // Substituted responses keep the host footer untouched.
    assert_eq!(defaults.footer(), Some(SYSTEM_FOOTER));

    let form = composer.form();
    assert_eq!(form.reason_id(), "soliciting votes");
    assert_eq!(
        form.read(FormField::CustomTemplateName).as_deref(),
        Some("soliciting votes")
    );
    assert_eq!(form.suspend_days(), 0);
    assert!(form.editor_text().contains("https://stackoverflow.com/help/privileges/comment"));
}

#[tokio::test]
async fn test_custom_fetch_path_still_intercepted() {
    let mut composer = composer().with_template_fetch_path("/admin/templates-v2/defaults");
    let Delivery::Apply(defaults) = composer.select_reason("account sharing").await.unwrap() else {
        panic!("expected defaults to be applied");
    };

    let gets = composer.transport().gets();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].path, "/admin/templates-v2/defaults");
    assert_eq!(gets[0].query_value("reasonId"), Some("OtherViolation"));
    assert_eq!(defaults.template_name(), Some("account sharing"));

    let Delivery::Apply(system) = composer.select_reason("Plagiarism").await.unwrap() else {
        panic!("expected defaults to be applied");
    };
    assert_eq!(
        system.footer(),
        Some("Regards,  \nStack Overflow Moderation Team")
    );
}

#[test]
fn test_composer_rejects_unvalidated_registry() {
    let build = |template: Template| {
        let registry = TemplateRegistry::from_templates([template]).unwrap();
        Composer::new(
            registry,
            system_ids(),
            scope(),
            FakeTransport::default(),
            RecordingNotifier::default(),
            RecordingNavigator::default(),
            form(),
        )
        .map(|_| ())
    };

    assert_eq!(
        build(Template::new("rude comments", "Rudeness", "Be nice.")),
        Err(RegistryError::UnknownSystemReason {
            template: "rude comments".to_string(),
            reason_id: "Rudeness".to_string(),
        })
    );
    assert_eq!(
        build(Template::new("Plagiarism", "OtherViolation", "Shadowed.")),
        Err(RegistryError::ShadowsSystemReason("Plagiarism".to_string()))
    );
    assert_eq!(
        build(Template::new("rude comments", "OtherViolation", "Be nice.")),
        Ok(())
    );
}

#[tokio::test]
async fn test_merge_retains_unoverridden_fields() {
    let template = Template::new("signature spam", "OtherViolation", "Please stop.")
        .with_suspension(3, "for signature spam");
    let mut composer = composer_with(
        vec![template.clone()],
        FakeTransport::default(),
        RecordingNotifier::default(),
    );
    let Delivery::Apply(merged) = composer.select_reason("signature spam").await.unwrap() else {
        panic!("expected defaults to be applied");
    };

    let system = system_defaults("OtherViolation");
    let overridden = serde_json::to_value(&template).unwrap();
    let overridden = overridden.as_object().unwrap();

    for (key, value) in system.as_object().unwrap() {
        if key != "MessageTemplate" {
            assert_eq!(&merged.as_map()[key], value);
        }
    }
    let merged_template = merged.message_template().unwrap();
    for (key, value) in system["MessageTemplate"].as_object().unwrap() {
        let expected = overridden.get(key).unwrap_or(value);
        assert_eq!(&merged_template[key], expected, "{key}");
    }
}

#[tokio::test]
async fn test_merged_payload_snapshot() {
    let template = Template::new("signature spam", "OtherViolation", "Please stop.")
        .with_suspension(3, "for signature spam");
    let mut composer = composer_with(
        vec![template],
        FakeTransport::default(),
        RecordingNotifier::default(),
    );
    let Delivery::Apply(delivered) = composer.select_reason("signature spam").await.unwrap() else {
        panic!("expected defaults to be applied");
    };
    insta::with_settings!({ sort_maps => true }, {
        insta::assert_json_snapshot!(delivered);
    });
}

#[tokio::test]
async fn test_reselecting_is_idempotent() {
    let mut composer = composer();
    let first = composer.select_reason("account sharing").await.unwrap();
    let editor_after_first = composer.form().editor_text();
    let second = composer.select_reason("account sharing").await.unwrap();

    assert!(matches!(first, Delivery::Apply(_)));
    assert_eq!(first, second);
    assert_eq!(composer.form().editor_text(), editor_after_first);
}

#[tokio::test]
async fn test_stale_result_never_applied() {
    let mut composer = composer();
    let first = composer.begin_selection("account sharing");
    let second = composer.begin_selection("soliciting votes");

    let first_result = composer.fetch(&first).await;
    let second_result = composer.fetch(&second).await;

    // The superseded selection finishes last, after the current one applied.
    let applied = composer.finish_selection(second, second_result).unwrap();
    let Delivery::Apply(current) = applied else {
        panic!("expected the current selection to apply");
    };
    let stale = composer.finish_selection(first, first_result).unwrap();
    assert_eq!(stale, Delivery::Discarded);

    let form = composer.form();
    assert_eq!(form.reason_id(), "soliciting votes");
    assert!(form.editor_text().starts_with(current.template_body().unwrap()));
    assert_eq!(form.preview_refreshes(), 1);
}

#[tokio::test]
async fn test_stale_result_discarded_when_finishing_first() {
    let mut composer = composer();
    let first = composer.begin_selection("account sharing");
    let first_result = composer.fetch(&first).await;
    let second = composer.begin_selection("closing spam");

    assert_eq!(
        composer.finish_selection(first, first_result).unwrap(),
        Delivery::Discarded
    );
    assert_eq!(composer.form().editor_text(), "");

    let second_result = composer.fetch(&second).await;
    assert!(matches!(
        composer.finish_selection(second, second_result).unwrap(),
        Delivery::Apply(_)
    ));
    assert!(composer.form().editor_text().contains("spam wave"));
}

#[tokio::test]
async fn test_replacement_failure_propagates() {
    let transport = FakeTransport::default().with_status("/admin/template/defaults", 503);
    let mut composer = composer_with(Vec::new(), transport, RecordingNotifier::default());
    let err = composer.select_reason("account sharing").await.unwrap_err();
    assert!(err.to_string().contains("503"));
    assert_eq!(composer.form().editor_text(), "");
}

#[tokio::test]
async fn test_initialize_adds_visible_templates_and_preselects() {
    let mut composer = composer();
    let delivery = composer
        .initialize("https://stackoverflow.com/users/message/create/42?reasonId=closing+spam")
        .await
        .unwrap();
    assert!(matches!(delivery, Some(Delivery::Apply(_))));
    assert_eq!(composer.form().reason_id(), "closing spam");

    let custom: Vec<_> = composer
        .form()
        .options()
        .iter()
        .filter(|option| option.group.as_deref() == Some("Custom Templates"))
        .map(|option| option.value.as_str())
        .collect();
    assert!(custom.contains(&"ban evasion, multiple accounts"));
    assert!(custom.contains(&"mass plagiarism"));
    assert_eq!(custom.len(), 18);
}

#[tokio::test]
async fn test_initialize_without_reason_does_nothing_else() {
    let mut composer = composer();
    let delivery = composer
        .initialize("/users/message/create/42")
        .await
        .unwrap();
    assert_eq!(delivery, None);
    assert!(composer.transport().calls().is_empty());
}

#[tokio::test]
async fn test_suspension_change_fixes_pluralisation() {
    let mut composer = composer();
    composer.form_mut().write(
        FormField::AutoSuspendMessage,
        "suspended for $days$ days".to_string(),
    );
    composer
        .form_mut()
        .write(FormField::SuspendDays, "1".to_string());
    let outcome = composer
        .dispatch(ComposerAction::SuspensionChanged)
        .await
        .unwrap();
    assert_eq!(outcome, ComposerOutcome::SuspensionUpdated);
    assert_eq!(
        composer.form().read(FormField::AutoSuspendMessage).as_deref(),
        Some("suspended for $days$ day")
    );
}

proptest! {
    #[test]
    fn prop_unknown_names_rejected_without_network(name in "[a-z][a-z ]{0,24}") {
        let mut composer = composer();
        prop_assume!(composer.registry().find(&name).is_none());
        prop_assume!(!composer.system_ids().contains(&name));

        let outcome = runtime()
            .block_on(composer.dispatch(ComposerAction::SelectReason(name.clone())))
            .unwrap();

        prop_assert_eq!(outcome, ComposerOutcome::Selected(Delivery::Rejected));
        prop_assert!(composer.transport().calls().is_empty());
        let toasts = composer.notifier().toasts();
        prop_assert_eq!(toasts.len(), 1);
        prop_assert_eq!(toasts[0].kind, NoticeKind::Danger);
        // The selector stays on the unknown option; nothing else changes.
        prop_assert_eq!(composer.form().reason_id(), name);
        prop_assert_eq!(composer.form().editor_text(), String::new());
    }
}

