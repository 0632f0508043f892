use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Stored in `users.role` as its lowercase name.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Admin,
}

impl Role {
    /// Whether a holder of `self` passes a gate that requires `required`.
    pub fn permits(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Employee, Role::Employee) => true,
            (Role::Employee, Role::Admin) => false,
        }
    }
}

impl TryFrom<String> for Role {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
