// User directory and authentication stub
//
// Companion service to the document store: the same latency-simulated
// call/response shape over an in-memory user and role list. This is a
// prototype credential check, not a security boundary; passwords live in
// the seed data in plaintext and are compared directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::workflow::types::Area;

/// Job position, used by reports to distinguish supervisors from
/// assistants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Supervisor,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Edit,
    Create,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::View,
        Permission::Edit,
        Permission::Create,
        Permission::Delete,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub area: Area,
    pub position: Option<Position>,
    /// Plaintext by design in this prototype. Stripped from every copy the
    /// directory hands out through `login`.
    pub password: Option<String>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    users: Vec<User>,
    roles: Vec<Role>,
    next_user_id: u64,
    next_role_id: u64,
}

/// In-memory user and role directory with simulated round-trip latency.
#[derive(Debug)]
pub struct UserDirectory {
    inner: RwLock<DirectoryInner>,
    latency: Duration,
}

impl UserDirectory {
    pub fn new(latency: Duration) -> Self {
        Self {
            inner: RwLock::new(DirectoryInner {
                users: Vec::new(),
                roles: Vec::new(),
                next_user_id: 1,
                next_role_id: 1,
            }),
            latency,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Directory pre-loaded with the demo dataset: one admin plus
    /// supervisors and assistants spread across the areas, all sharing the
    /// demo password.
    pub async fn seeded(latency: Duration) -> Self {
        let directory = Self::new(latency);
        {
            let mut inner = directory.inner.write().await;
            inner.users = demo_users();
            inner.roles = demo_roles();
            inner.next_user_id = inner.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            inner.next_role_id = inner.roles.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        }
        directory
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Credential check against the user list. On a match the returned
    /// copy has its password stripped; a real API would never return it.
    pub async fn login(&self, email: &str, password: &str) -> Option<User> {
        self.simulate_round_trip().await;
        let inner = self.inner.read().await;

        let user = inner
            .users
            .iter()
            .find(|u| u.email == email && u.password.as_deref() == Some(password));

        match user {
            Some(user) => {
                info!(user.id = user.id, area = %user.area, "login succeeded");
                let mut copy = user.clone();
                copy.password = None;
                Some(copy)
            }
            None => {
                warn!(email = %email, "login failed");
                None
            }
        }
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.simulate_round_trip().await;
        self.inner.read().await.users.clone()
    }

    /// Add a user, assigning the next id. No email-uniqueness validation;
    /// the prototype accepts what the form sends.
    pub async fn add_user(&self, mut user: User) -> User {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        user.id = inner.next_user_id;
        inner.next_user_id += 1;
        info!(user.id = user.id, area = %user.area, "user added");
        inner.users.push(user.clone());
        user
    }

    /// Replace the user with `user.id`. Returns the stored copy, or `None`
    /// when no such user exists.
    pub async fn update_user(&self, user: User) -> Option<User> {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        let slot = inner.users.iter_mut().find(|u| u.id == user.id)?;
        *slot = user.clone();
        info!(user.id = user.id, "user updated");
        Some(user)
    }

    pub async fn remove_user(&self, user_id: u64) -> bool {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != user_id);
        let removed = inner.users.len() < before;
        if removed {
            info!(user.id = user_id, "user removed");
        }
        removed
    }

    pub async fn list_roles(&self) -> Vec<Role> {
        self.simulate_round_trip().await;
        self.inner.read().await.roles.clone()
    }

    pub async fn add_role(&self, mut role: Role) -> Role {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        role.id = inner.next_role_id;
        inner.next_role_id += 1;
        inner.roles.push(role.clone());
        role
    }

    pub async fn update_role(&self, role: Role) -> Option<Role> {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        let slot = inner.roles.iter_mut().find(|r| r.id == role.id)?;
        *slot = role.clone();
        Some(role)
    }

    pub async fn remove_role(&self, role_id: u64) -> bool {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;
        let before = inner.roles.len();
        inner.roles.retain(|r| r.id != role_id);
        inner.roles.len() < before
    }
}

fn demo_users() -> Vec<User> {
    let user = |id, first: &str, last: &str, email: &str, area, position| User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        area,
        position,
        password: Some("123".to_string()),
    };
    vec![
        user(1, "Admin", "Root", "admin@example.com", Area::Admin, None),
        user(
            2,
            "Joan",
            "Perez",
            "joan.perez@example.com",
            Area::Purchasing,
            Some(Position::Supervisor),
        ),
        user(
            3,
            "Maria",
            "Reyes",
            "maria.reyes@example.com",
            Area::Sales,
            Some(Position::Assistant),
        ),
        user(
            4,
            "Carl",
            "Lopez",
            "carl.lopez@example.com",
            Area::Billing,
            Some(Position::Supervisor),
        ),
        user(
            5,
            "Ana",
            "Gomez",
            "ana.gomez@example.com",
            Area::Sales,
            Some(Position::Supervisor),
        ),
        user(
            6,
            "Omar",
            "Diaz",
            "omar.diaz@example.com",
            Area::Operations,
            Some(Position::Supervisor),
        ),
    ]
}

fn demo_roles() -> Vec<Role> {
    vec![
        Role {
            id: 1,
            name: "Administrator".to_string(),
            permissions: Permission::ALL.to_vec(),
        },
        Role {
            id: 2,
            name: "Supervisor".to_string(),
            permissions: vec![Permission::View, Permission::Edit],
        },
        Role {
            id: 3,
            name: "Assistant".to_string(),
            permissions: vec![Permission::View],
        },
    ]
}
