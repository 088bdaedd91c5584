use super::*;

fn session(role: Role) -> Session {
    Session { role, is_verified: true, is_blocked: false, provider: Provider::Local }
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn parse_session_reads_camel_case_descriptor() {
    let parsed =
        parse_session(r#"{"role":"admin","isVerified":true,"isBlocked":false,"provider":"google"}"#).unwrap();
    assert_eq!(
        parsed,
        Session { role: Role::Admin, is_verified: true, is_blocked: false, provider: Provider::Google }
    );
}

#[test]
fn parse_session_drops_extra_identity_fields() {
    let parsed = parse_session(
        r#"{"id":"u-1","email":"a@b.com","role":"user","isVerified":false,"isBlocked":false,"provider":"local"}"#,
    )
    .unwrap();
    assert_eq!(parsed.role, Role::User);
    assert!(!parsed.is_verified);
}

#[test]
fn parse_session_defaults_missing_flags_and_provider() {
    let parsed = parse_session(r#"{"role":"user"}"#).unwrap();
    assert!(!parsed.is_verified);
    assert!(!parsed.is_blocked);
    assert_eq!(parsed.provider, Provider::Local);
}

#[test]
fn parse_session_rejects_unknown_role() {
    let err = parse_session(r#"{"role":"superuser","isVerified":true,"isBlocked":false}"#).unwrap_err();
    assert!(err.to_string().contains("unknown role"));
}

#[test]
fn parse_session_rejects_unknown_provider() {
    assert!(parse_session(r#"{"role":"user","provider":"github"}"#).is_err());
}

#[test]
fn role_from_str_is_case_insensitive() {
    assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" user ".parse::<Role>(), Ok(Role::User));
    assert_eq!("guest".parse::<Role>(), Err(SessionParseError::UnknownRole("guest".to_owned())));
}

// =============================================================================
// serialization
// =============================================================================

#[test]
fn session_serializes_only_whitelisted_fields() {
    let json = serde_json::to_value(session(Role::Admin)).unwrap();
    let object = json.as_object().unwrap();
    let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
    keys.sort_unstable();
    assert_eq!(keys, ["isBlocked", "isVerified", "provider", "role"]);
    assert_eq!(object["role"], "admin");
    assert_eq!(object["provider"], "local");
}

#[test]
fn serialized_session_parses_back() {
    let original = Session { role: Role::User, is_verified: false, is_blocked: true, provider: Provider::Google };
    let raw = serde_json::to_string(&original).unwrap();
    assert_eq!(parse_session(&raw).unwrap(), original);
}

#[test]
fn is_admin_matches_role() {
    assert!(session(Role::Admin).is_admin());
    assert!(!session(Role::User).is_admin());
}
