use std::sync::LazyLock;

use mmh_model::FormField;
use regex::{NoExpand, Regex};

use super::{FormAdapter, FormView};

static DAYS_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$days\$ days?").expect("Invalid days placeholder regex"));

/// Makes the auto-suspend message agree with the suspension length.
///
/// Rewrites the first `$days$ day`/`$days$ days` to the singular for exactly
/// one day and the plural otherwise, then refreshes the preview.
pub fn fix_auto_suspend_pluralisation<F: FormAdapter + ?Sized>(form: &mut F) {
    let replacement = if form.suspend_days() == 1 {
        "$days$ day"
    } else {
        "$days$ days"
    };
    if let Some(message) = form.read(FormField::AutoSuspendMessage) {
        let fixed = DAYS_PLACEHOLDER.replace(&message, NoExpand(replacement));
        if fixed != message {
            tracing::trace!(replacement, "fixed auto-suspend pluralisation");
            let fixed = fixed.into_owned();
            form.write(FormField::AutoSuspendMessage, fixed);
        }
    }
    form.refresh_preview();
}
