use crate::overrides::Overrides;

/// Collect overrides from environment variables matching `{PREFIX}__*`.
///
/// `MYAPP__TIMEOUT=45` overrides `timeout`. The remainder after the prefix is
/// lowercased to match parameter keys. Values stay raw text, like argument
/// overrides.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_overrides(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Overrides {
    let needle = format!("{prefix}__");
    let mut overrides = Overrides::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        overrides.insert(rest.to_lowercase(), value);
    }

    overrides
}
