//! Tables and one-line reports printed by the commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use mmh_core::{BanEvasionOutcome, Delivery, SubmitOutcome};
use mmh_model::Template;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// One row per template: name, aliased reason, suspension, footer, scope.
#[must_use]
pub fn template_rows(templates: &[&Template]) -> Vec<[String; 5]> {
    templates
        .iter()
        .map(|template| {
            let days = template
                .default_suspend_days
                .map_or_else(|| "host".to_string(), |days| days.to_string());
            let footer = match (&template.footer, template.includes_suspension_footer()) {
                (Some(footer), _) if footer.is_empty() => "none",
                (Some(_), _) => "custom",
                (None, true) => "host",
                (None, false) => "host, no suspension footer",
            };
            let scope = if template.stack_overflow_only {
                "Stack Overflow"
            } else {
                "all sites"
            };
            [
                template.template_name.clone(),
                template.analogous_system_reason_id.clone(),
                days,
                footer.to_string(),
                scope.to_string(),
            ]
        })
        .collect()
}

pub fn templates_table(templates: &[&Template]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Template", "Alias of", "Days", "Footer", "Offered on"]);
    apply_table_style(&mut table);
    for row in template_rows(templates) {
        table.add_row(row);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

/// What a selection delivered, for people.
#[must_use]
pub fn describe_delivery(delivery: &Delivery) -> &'static str {
    match delivery {
        Delivery::Apply(_) => "defaults applied",
        Delivery::Discarded => "superseded by a newer selection",
        Delivery::Rejected => "template not found",
        Delivery::Skipped => "no template selected",
    }
}

/// One line per submission outcome.
#[must_use]
pub fn describe_submit(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Delegated => "Sent as a plain site message".to_string(),
        SubmitOutcome::Rejected(err) => format!("Not sent: {err}"),
        SubmitOutcome::SendFailed(err) => format!("Not sent: {err}"),
        SubmitOutcome::Done { location } => format!("Sent and annotated: {location}"),
        SubmitOutcome::PartialFailure { location, .. } => {
            format!("Sent but not annotated: {location}")
        }
    }
}

/// One line per deletion outcome.
#[must_use]
pub fn describe_deletion(outcome: &BanEvasionOutcome) -> String {
    match outcome {
        BanEvasionOutcome::MainResolved { main_url } => format!("Main account: {main_url}"),
        BanEvasionOutcome::LookupFailed(err) => format!("Lookup failed: {err}"),
        BanEvasionOutcome::Rejected(err) => format!("Not deleted: {err}"),
        BanEvasionOutcome::Declined => "Not deleted: declined".to_string(),
        BanEvasionOutcome::DeletionFailed(err) => format!("Not deleted: {err}"),
        BanEvasionOutcome::AnnotationFailed(err) => {
            format!("Deleted but main not annotated: {err}")
        }
        BanEvasionOutcome::Completed { .. } => "Deleted and annotated".to_string(),
        BanEvasionOutcome::Cancelled => "Cancelled".to_string(),
    }
}
