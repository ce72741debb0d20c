/// Env keys the configuration and logging layers read.
const KNOWN_KEYS: [&str; 4] = [
    "ATTRITION_ARTIFACTS__PIPELINE_PATH",
    "ATTRITION_ARTIFACTS__DEFAULTS_PATH",
    "ATTRITION_GENERAL__DEFAULT_FORMAT",
    "ATTRITION_LOG",
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured() {
    for warning in collect_unconfigured_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut unknown = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("ATTRITION_") && !KNOWN_KEYS.contains(&key.as_str()))
        .collect::<Vec<_>>();
    unknown.sort();

    unknown
        .into_iter()
        .map(|key| {
            format!(
                "{key} is not a recognized setting and was ignored. Use double underscores between section and key (example: ATTRITION_ARTIFACTS__PIPELINE_PATH)."
            )
        })
        .collect()
}
