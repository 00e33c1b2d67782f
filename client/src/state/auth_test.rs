use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        email: "test@example.com".to_owned(),
        name: "Alice".to_owned(),
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

#[test]
fn default_state_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn is_authenticated_tracks_user_presence() {
    let state = AuthState { user: Some(user()), loading: false };
    assert!(state.is_authenticated());
}
