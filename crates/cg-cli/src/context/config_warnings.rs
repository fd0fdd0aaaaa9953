use cg_config::ENV_PREFIX;

const SECTIONS: [&str; 4] = ["API", "SESSION", "AUTH", "GENERAL"];

/// Warn about `CROPGUARD_*` keys that use a single underscore after the
/// section name and therefore configure nothing.
pub fn warn_misspelled_env() {
    for warning in collect_misspelled_env(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_misspelled_env<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();
    for (key, _) in env {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        for section in SECTIONS {
            let Some(field) = rest
                .strip_prefix(section)
                .and_then(|tail| tail.strip_prefix('_'))
            else {
                continue;
            };
            if field.is_empty() || field.starts_with('_') {
                continue;
            }
            warnings.push(format!(
                "{key} has no effect. Use double underscores (example: {ENV_PREFIX}{section}__{field})."
            ));
        }
    }
    warnings
}
