/// Joins labelled values into one string, skipping empty values.
///
/// With `align` set, labels (including `kv_sep`) are padded with spaces to the
/// width of the longest one.
pub fn build_detail_string(
    pairs: &[(&str, &str)],
    kv_sep: &str,
    record_sep: &str,
    align: bool,
) -> String {
    let labelled: Vec<(String, &str)> = pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| (format!("{label}{kv_sep}"), *value))
        .collect();

    let width = if align {
        labelled
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
    } else {
        0
    };

    labelled
        .iter()
        .map(|(label, value)| format!("{label:<width$}{value}"))
        .collect::<Vec<_>>()
        .join(record_sep)
}
