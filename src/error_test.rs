use super::*;

#[test]
fn status_only_for_status_variant() {
    let err = ApiError::Status { status: 404, body: String::new() };
    assert_eq!(err.status(), Some(404));
    assert_eq!(ApiError::Request("refused".into()).status(), None);
    assert_eq!(ApiError::Decode("eof".into()).status(), None);
}

#[test]
fn unauthorized_covers_401_and_403() {
    assert!(ApiError::Status { status: 401, body: String::new() }.is_unauthorized());
    assert!(ApiError::Status { status: 403, body: String::new() }.is_unauthorized());
    assert!(!ApiError::Status { status: 500, body: String::new() }.is_unauthorized());
    assert!(!ApiError::Request("timeout".into()).is_unauthorized());
}

#[test]
fn display_includes_status_and_body() {
    let err = ApiError::Status { status: 401, body: "Unauthorized".into() };
    let text = err.to_string();
    assert!(text.contains("401"));
    assert!(text.contains("Unauthorized"));
}

#[test]
fn config_error_names_variable() {
    let err = ConfigError::InvalidValue { var: "TRAINER_GUARD_POLICY", value: "strict".into() };
    assert_eq!(err.to_string(), "invalid value for TRAINER_GUARD_POLICY: strict");
}
