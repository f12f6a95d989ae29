//! Mapping of I/O, JSON, keychain and HTTP errors onto [`PartsDeskError`]

use keyring::Error as KeyringError;
use partsdesk_domain::PartsDeskError;
use reqwest::Error as HttpError;

/// Wraps a [`PartsDeskError`] so third-party error types can be converted
/// with `?` inside this crate.
#[derive(Debug)]
pub struct InfraError(pub PartsDeskError);

impl From<InfraError> for PartsDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PartsDeskError> for InfraError {
    fn from(value: PartsDeskError) -> Self {
        InfraError(value)
    }
}

/// `impl From<$source> for InfraError` through a classification function.
macro_rules! classify_into_infra {
    ($($source:ty => $classify:ident),+ $(,)?) => {
        $(
            impl From<$source> for InfraError {
                fn from(value: $source) -> Self {
                    InfraError($classify(value))
                }
            }
        )+
    };
}

classify_into_infra! {
    std::io::Error => classify_io,
    serde_json::Error => classify_json,
    KeyringError => classify_keyring,
    HttpError => classify_http,
}

/* -------------------------------------------------------------------------- */
/* Session storage: files and keychain */
/* -------------------------------------------------------------------------- */

fn classify_io(err: std::io::Error) -> PartsDeskError {
    match err.kind() {
        std::io::ErrorKind::NotFound => {
            PartsDeskError::NotFound(format!("session file missing: {err}"))
        }
        std::io::ErrorKind::PermissionDenied => {
            PartsDeskError::Storage(format!("session file is not accessible: {err}"))
        }
        _ => PartsDeskError::Storage(format!("session file I/O failed: {err}")),
    }
}

fn classify_json(err: serde_json::Error) -> PartsDeskError {
    let detail = if err.is_io() { "unreadable" } else { "malformed" };
    PartsDeskError::Storage(format!("{detail} session data: {err}"))
}

fn classify_keyring(err: KeyringError) -> PartsDeskError {
    match err {
        KeyringError::NoEntry => PartsDeskError::NotFound("no keychain entry for partsdesk".into()),
        KeyringError::BadEncoding(_) => {
            PartsDeskError::Storage("keychain entry holds non UTF-8 data".into())
        }
        KeyringError::NoStorageAccess(inner) | KeyringError::PlatformFailure(inner) => {
            PartsDeskError::Storage(format!("keychain unavailable: {inner}"))
        }
        other => PartsDeskError::Storage(format!("keychain error: {other}")),
    }
}

/* -------------------------------------------------------------------------- */
/* Backend transport */
/* -------------------------------------------------------------------------- */

fn classify_http(err: HttpError) -> PartsDeskError {
    if err.is_timeout() {
        return PartsDeskError::Network("backend did not answer in time".into());
    }
    if err.is_connect() {
        return PartsDeskError::Network("could not reach the PartsDesk backend".into());
    }

    let Some(status) = err.status() else {
        return PartsDeskError::Network(err.to_string());
    };
    let text = format!("backend answered {status}");
    match status.as_u16() {
        401 | 403 => PartsDeskError::Auth(text),
        404 => PartsDeskError::NotFound(text),
        400..=499 => PartsDeskError::InvalidInput(text),
        _ => PartsDeskError::Network(text),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: PartsDeskError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            PartsDeskError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn io_permission_denied_maps_to_storage() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let mapped: PartsDeskError = InfraError::from(err).into();
        assert!(matches!(mapped, PartsDeskError::Storage(_)));
    }

    #[test]
    fn malformed_json_maps_to_storage() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: PartsDeskError = InfraError::from(err).into();
        match mapped {
            PartsDeskError::Storage(msg) => assert!(msg.contains("malformed")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: PartsDeskError = InfraError::from(error).into();
        match mapped {
            PartsDeskError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }
}
