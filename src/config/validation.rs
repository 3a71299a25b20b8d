use super::CredentialConfig;

/// Validate one credential section
///
/// Absent values are fine (they surface per call as a missing-credential
/// error), but a value that is present and blank is a configuration mistake
/// and fails the load. Error messages name the setting, never its value.
pub fn validate_credential(
    section: &str,
    credential: &CredentialConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let values = [
        ("app_id", &credential.app_id),
        ("api_key", &credential.api_key),
        ("api_secret", &credential.api_secret),
    ];

    for (name, value) in values {
        if let Some(value) = value
            && value.trim().is_empty()
        {
            return Err(format!("xfyun.{section}.{name} is set but empty").into());
        }
    }

    Ok(())
}

/// Validate that the bind host is usable
pub fn validate_host(host: &str) -> Result<(), Box<dyn std::error::Error>> {
    if host.trim().is_empty() {
        return Err("HOST cannot be empty".into());
    }
    Ok(())
}
