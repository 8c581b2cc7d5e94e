pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }

    let mut truncated = label
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    truncated.push('…');
    truncated
}

pub fn format_distance(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.3}"),
        None => "∞".to_owned(),
    }
}

/// Last path or fragment segment of an IRI, for window titles.
pub fn short_name(uri: &str) -> &str {
    uri.trim_end_matches(['/', '#'])
        .rsplit(['/', '#', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(uri)
}
