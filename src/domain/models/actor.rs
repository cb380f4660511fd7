use serde::{Deserialize, Serialize};

/// Verified identity of the caller, decoded from the access token.
/// Tokens are issued by the external identity provider; this service only
/// maps the role claim onto the fixed capability set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Admin { id: String },
    Company { id: String },
    Trainer { id: String },
}

impl Actor {
    pub fn id(&self) -> &str {
        match self {
            Actor::Admin { id } | Actor::Company { id } | Actor::Trainer { id } => id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin { .. })
    }

    pub fn role_name(&self) -> &'static str {
        match self {
            Actor::Admin { .. } => "ADMIN",
            Actor::Company { .. } => "COMPANY",
            Actor::Trainer { .. } => "TRAINER",
        }
    }

    pub fn from_role(role: &str, id: String) -> Option<Self> {
        match role {
            "ADMIN" => Some(Actor::Admin { id }),
            "COMPANY" => Some(Actor::Company { id }),
            "TRAINER" => Some(Actor::Trainer { id }),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub csrf_token: String,
    pub aud: String,
    pub exp: usize,
}
