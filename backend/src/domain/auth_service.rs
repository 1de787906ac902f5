//! Mock authentication.
//!
//! Credentials are hard-coded demo accounts; this is a stand-in flow, not a
//! security boundary. The resulting session is persisted through the
//! preference store so it survives a restart of the UI, mirroring how the
//! directory treats the rest of its preference state.

use anyhow::Result;
use tracing::{info, warn};

use crate::storage::PreferenceStore;
use shared::{AuthResponse, AuthSession, BloodGroup, LoginRequest, RegisterRequest, UserRole};

const ADMIN_EMAIL: &str = "blood@admin.com";
const ADMIN_PASSWORD: &str = "admin1234";
const USER_EMAIL: &str = "blood@user.com";
const USER_PASSWORD: &str = "user1234";

/// Service for the demo login/registration flow.
#[derive(Clone)]
pub struct AuthService {
    preferences: PreferenceStore,
}

impl AuthService {
    pub fn new(preferences: PreferenceStore) -> Self {
        Self { preferences }
    }

    /// Check the submitted credentials against the demo accounts. A
    /// successful login stores the session in the preference file.
    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let session = match (request.email.as_str(), request.password.as_str()) {
            (ADMIN_EMAIL, ADMIN_PASSWORD) => Some(AuthSession {
                email: request.email.clone(),
                name: "Admin User".to_string(),
                role: UserRole::Admin,
                location: Some("Dhaka".to_string()),
                blood_group: Some(BloodGroup::APositive),
                phone: Some("+880123456789".to_string()),
            }),
            (USER_EMAIL, USER_PASSWORD) => Some(AuthSession {
                email: request.email.clone(),
                name: "Regular User".to_string(),
                role: UserRole::User,
                location: Some("Chittagong".to_string()),
                blood_group: Some(BloodGroup::OPositive),
                phone: Some("+880198765432".to_string()),
            }),
            _ => None,
        };

        match session {
            Some(session) => {
                self.preferences.update(|prefs| prefs.auth = Some(session.clone()))?;
                info!("Logged in {} as {:?}", session.email, session.role);
                Ok(AuthResponse {
                    success: true,
                    message: "Login successful".to_string(),
                    session: Some(session),
                })
            }
            None => {
                warn!("Failed login attempt for {}", request.email);
                Ok(AuthResponse {
                    success: false,
                    message: "Invalid email or password".to_string(),
                    session: None,
                })
            }
        }
    }

    /// Demo registration: any non-empty email and password creates a
    /// regular-user session.
    pub fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        if request.email.trim().is_empty() || request.password.trim().is_empty() {
            return Ok(AuthResponse {
                success: false,
                message: "Email and password are required".to_string(),
                session: None,
            });
        }

        let session = AuthSession {
            email: request.email,
            name: request.name,
            role: UserRole::User,
            location: None,
            blood_group: None,
            phone: None,
        };
        self.preferences.update(|prefs| prefs.auth = Some(session.clone()))?;
        info!("Registered new user session for {}", session.email);

        Ok(AuthResponse {
            success: true,
            message: "Registration successful".to_string(),
            session: Some(session),
        })
    }

    /// Clear any stored session.
    pub fn logout(&self) -> Result<()> {
        self.preferences.update(|prefs| prefs.auth = None)?;
        info!("Cleared auth session");
        Ok(())
    }

    /// The session currently stored in the preference file, if any.
    pub fn current_session(&self) -> Result<Option<AuthSession>> {
        Ok(self.preferences.load()?.auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (AuthService, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.yaml"));
        (AuthService::new(store), dir)
    }

    #[test]
    fn admin_credentials_yield_an_admin_session() {
        let (auth, _dir) = service();
        let response = auth
            .login(LoginRequest {
                email: "blood@admin.com".to_string(),
                password: "admin1234".to_string(),
            })
            .unwrap();

        assert!(response.success);
        let session = response.session.unwrap();
        assert_eq!(session.role, UserRole::Admin);
        assert_eq!(session.name, "Admin User");
        assert_eq!(auth.current_session().unwrap().unwrap().email, "blood@admin.com");
    }

    #[test]
    fn wrong_credentials_are_rejected_without_a_session() {
        let (auth, _dir) = service();
        let response = auth
            .login(LoginRequest {
                email: "blood@admin.com".to_string(),
                password: "wrong".to_string(),
            })
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.message, "Invalid email or password");
        assert!(auth.current_session().unwrap().is_none());
    }

    #[test]
    fn registration_creates_a_user_session() {
        let (auth, _dir) = service();
        let response = auth
            .register(RegisterRequest {
                name: "Nasrin Akter".to_string(),
                email: "nasrin@example.com".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        assert!(response.success);
        assert_eq!(response.session.unwrap().role, UserRole::User);

        let empty = auth
            .register(RegisterRequest {
                name: "Nobody".to_string(),
                email: "  ".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        assert!(!empty.success);
    }

    #[test]
    fn logout_clears_the_stored_session() {
        let (auth, _dir) = service();
        auth.login(LoginRequest {
            email: "blood@user.com".to_string(),
            password: "user1234".to_string(),
        })
        .unwrap();
        assert!(auth.current_session().unwrap().is_some());

        auth.logout().unwrap();
        assert!(auth.current_session().unwrap().is_none());
    }
}
