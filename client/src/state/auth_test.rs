use super::*;

fn user(role: Role, station: Option<&str>) -> SessionUser {
    SessionUser {
        username: "jdoe".to_owned(),
        role,
        station_acronym: station.map(str::to_owned),
    }
}

#[test]
fn admin_edits_everything() {
    assert!(user(Role::Admin, None).can_edit("SVB"));
}

#[test]
fn station_user_edits_own_station_only() {
    let u = user(Role::Station, Some("svb"));
    assert!(u.can_edit("SVB"));
    assert!(!u.can_edit("ANS"));
    assert!(!user(Role::Station, None).can_edit("SVB"));
}

#[test]
fn readonly_edits_nothing() {
    assert!(!user(Role::Readonly, Some("SVB")).can_edit("SVB"));
}

#[test]
fn unverified_state_cannot_edit() {
    let state = AuthState {
        user: Some(user(Role::Admin, None)),
        verified: false,
    };
    assert!(!state.can_edit("SVB"));
    let state = AuthState { verified: true, ..state };
    assert!(state.can_edit("SVB"));
    assert!(state.is_admin());
}

#[test]
fn user_record_decodes_with_unknown_role() {
    let u: SessionUser =
        serde_json::from_str(r#"{"username": "x", "role": "superuser", "station": "LON"}"#).unwrap();
    assert_eq!(u.role, Role::Readonly);
    assert_eq!(u.station_acronym.as_deref(), Some("LON"));
}

#[test]
fn login_redirect_keeps_return_path() {
    assert_eq!(login_redirect_url("/login.html", None), "/login.html");
    assert_eq!(login_redirect_url("/login.html", Some("/")), "/login.html");
    assert_eq!(
        login_redirect_url("/login.html", Some("/station/SVB")),
        "/login.html?redirect=%2Fstation%2FSVB"
    );
}

#[test]
fn native_build_has_no_stored_session() {
    assert_eq!(stored_token(), None);
    assert_eq!(AuthState::restore(), AuthState::default());
}
