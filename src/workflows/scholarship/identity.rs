use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::RepositoryError;
use crate::store::{load_record, save_record, KeyValueStore, SESSION_KEY, USERS_KEY};

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Role assigned at registration; gates which workflow surfaces unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Evaluator,
    Applicant,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Evaluator => "evaluator",
            Role::Applicant => "applicant",
        }
    }
}

/// A registered user. Credentials are stored and compared in plain text;
/// real authentication is out of scope for this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub age: u8,
}

/// Registration input before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub age: u8,
}

/// The single current-user pointer. A transient reference, not an owned
/// entity: at most one session exists per store instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
}

/// Typed access to the user collection.
pub trait UserRepository: Send + Sync {
    fn list(&self) -> Result<Vec<User>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
}

/// Access to the session record.
pub trait SessionStore: Send + Sync {
    fn current(&self) -> Result<Option<Session>, RepositoryError>;
    fn save(&self, session: Session) -> Result<(), RepositoryError>;
    fn clear(&self) -> Result<(), RepositoryError>;
}

/// User repository persisting the whole collection under one store key.
pub struct StoreUserRepository<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreUserRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> UserRepository for StoreUserRepository<S> {
    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(load_record(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|user| user.email == email))
    }

    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.list()?;
        users.push(user.clone());
        save_record(self.store.as_ref(), USERS_KEY, &users)?;
        Ok(user)
    }
}

/// Session record backed by the key-value store.
pub struct StoreSession<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreSession<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> SessionStore for StoreSession<S> {
    fn current(&self) -> Result<Option<Session>, RepositoryError> {
        Ok(load_record(self.store.as_ref(), SESSION_KEY)?)
    }

    fn save(&self, session: Session) -> Result<(), RepositoryError> {
        Ok(save_record(self.store.as_ref(), SESSION_KEY, &session)?)
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        Ok(self.store.remove(SESSION_KEY)?)
    }
}

/// Error raised by identity operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

const MIN_PASSWORD_LEN: usize = 6;

/// Service owning user records and the session pointer.
pub struct IdentityService<R, T> {
    users: Arc<R>,
    session: Arc<T>,
}

impl<R, T> IdentityService<R, T>
where
    R: UserRepository,
    T: SessionStore,
{
    pub fn new(users: Arc<R>, session: Arc<T>) -> Self {
        Self { users, session }
    }

    /// Register a new user and establish a session for them.
    pub fn register(&self, new_user: NewUser) -> Result<User, IdentityError> {
        let name = new_user.name.trim().to_string();
        let email = new_user.email.trim().to_string();

        if name.is_empty() {
            return Err(IdentityError::Validation {
                field: "name",
                reason: "must not be empty",
            });
        }
        if !email_looks_valid(&email) {
            return Err(IdentityError::Validation {
                field: "email",
                reason: "must look like an email address",
            });
        }
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Validation {
                field: "password",
                reason: "must be at least 6 characters",
            });
        }
        if new_user.age == 0 {
            return Err(IdentityError::Validation {
                field: "age",
                reason: "must be greater than zero",
            });
        }
        if self.users.find_by_email(&email)?.is_some() {
            return Err(IdentityError::DuplicateEmail);
        }

        let user = self.users.insert(User {
            id: UserId::generate(),
            name,
            email,
            password: new_user.password,
            role: new_user.role,
            age: new_user.age,
        })?;

        self.session.save(Session {
            user_id: user.id.clone(),
        })?;
        info!(role = user.role.label(), "user registered");
        Ok(user)
    }

    /// Establish a session when email, password, and role all match one
    /// stored user exactly.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<User, IdentityError> {
        let user = self
            .users
            .list()?
            .into_iter()
            .find(|user| user.email == email && user.password == password && user.role == role)
            .ok_or(IdentityError::InvalidCredentials)?;

        self.session.save(Session {
            user_id: user.id.clone(),
        })?;
        Ok(user)
    }

    /// Clear the session. Safe to call with no session active.
    pub fn logout(&self) -> Result<(), IdentityError> {
        Ok(self.session.clear()?)
    }

    /// Resolve the session to its user. A dangling user id reads as no
    /// session rather than an error.
    pub fn current_user(&self) -> Result<Option<User>, IdentityError> {
        let Some(session) = self.session.current()? else {
            return Ok(None);
        };
        Ok(self
            .users
            .list()?
            .into_iter()
            .find(|user| user.id == session.user_id))
    }

    /// Insert the demo admin/evaluator/applicant trio on a fresh store.
    /// Does nothing once any user exists.
    pub fn seed_demo_users(&self) -> Result<(), IdentityError> {
        if !self.users.list()?.is_empty() {
            return Ok(());
        }

        let demo = [
            ("Administrator", "admin@example.com", "admin123", Role::Admin, 35u8),
            (
                "Evaluator",
                "evaluator@example.com",
                "evaluator123",
                Role::Evaluator,
                30,
            ),
            (
                "Applicant",
                "applicant@example.com",
                "applicant123",
                Role::Applicant,
                22,
            ),
        ];
        for (name, email, password, role, age) in demo {
            self.users.insert(User {
                id: UserId::generate(),
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
                age,
            })?;
        }
        info!("seeded demo users");
        Ok(())
    }
}

fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
