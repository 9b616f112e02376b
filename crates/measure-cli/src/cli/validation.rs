/// Parse a comma-separated project allow-list.
///
/// Whitespace around names is ignored. Empty entries are rejected.
///
/// # Examples
///
/// `web,docs` and `web, docs` both yield `["web", "docs"]`.
pub fn parse_only(s: &str) -> Result<Vec<String>, String> {
    let names: Vec<String> = s.split(',').map(|n| n.trim().to_string()).collect();

    if names.iter().any(String::is_empty) {
        return Err(format!(
            "Project list contains an empty name: '{}'. Use comma-separated names like 'web,docs'",
            s
        ));
    }

    Ok(names)
}

/// Parse a build concurrency of at least 1.
pub fn parse_concurrency(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Concurrency must be a positive integer: '{}'", s)),
    }
}

/// Parse a timeout in whole seconds, greater than zero.
pub fn parse_timeout(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("Timeout must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Timeout must be a number of seconds: '{}'", s)),
    }
}
