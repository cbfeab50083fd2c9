//! Access Policy
//!
//! Row-level visibility for every resource, declared in one table.
//!
//! Each resource maps to a [`Rule`]. A rule, evaluated against the
//! requesting [`Principal`], yields a [`Scope`] that repositories apply
//! when listing and services apply on item access.
//!
//! | Resource       | Rule                            |
//! |----------------|---------------------------------|
//! | User           | SuperuserOrSelf                 |
//! | CurrentUser    | SelfOnly                        |
//! | Vehicle        | SuperuserOrAssignedMechanic     |
//! | VehiclePart    | SuperuserOrAssignedMechanic     |
//! | ServiceType    | Authenticated                   |
//! | SubService     | Authenticated                   |
//! | VehicleService | Authenticated                   |

use crate::domain::entities::{User, UserType};

/// Resources exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    CurrentUser,
    ServiceType,
    SubService,
    VehiclePart,
    VehicleService,
    Vehicle,
}

/// Visibility rule attached to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Any authenticated caller sees every row.
    Authenticated,
    /// Callers only ever see rows they own, superuser or not.
    SelfOnly,
    /// Superusers see everything; others see rows they own.
    SuperuserOrSelf,
    /// Superusers see everything; mechanics see rows assigned to them;
    /// everyone else sees nothing.
    SuperuserOrAssignedMechanic,
}

/// Row filter produced by evaluating a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    OwnedBy(i64),
    Nothing,
}

/// The authenticated caller as far as the policy is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub user_type: UserType,
    pub is_superuser: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            user_type: user.user_type,
            is_superuser: user.is_superuser,
        }
    }
}

/// Rows that belong to a user for visibility purposes.
///
/// Users own themselves; vehicles and parts are owned by their assigned
/// mechanic. Catalogue rows have no owner.
pub trait Owned {
    fn owner_id(&self) -> Option<i64>;
}

/// The policy table.
pub const fn rule_for(resource: Resource) -> Rule {
    match resource {
        Resource::User => Rule::SuperuserOrSelf,
        Resource::CurrentUser => Rule::SelfOnly,
        Resource::Vehicle | Resource::VehiclePart => Rule::SuperuserOrAssignedMechanic,
        Resource::ServiceType | Resource::SubService | Resource::VehicleService => {
            Rule::Authenticated
        }
    }
}

impl Rule {
    pub fn evaluate(self, principal: &Principal) -> Scope {
        match self {
            Rule::Authenticated => Scope::All,
            Rule::SelfOnly => Scope::OwnedBy(principal.user_id),
            Rule::SuperuserOrSelf if principal.is_superuser => Scope::All,
            Rule::SuperuserOrSelf => Scope::OwnedBy(principal.user_id),
            Rule::SuperuserOrAssignedMechanic if principal.is_superuser => Scope::All,
            Rule::SuperuserOrAssignedMechanic if principal.user_type == UserType::Mechanic => {
                Scope::OwnedBy(principal.user_id)
            }
            Rule::SuperuserOrAssignedMechanic => Scope::Nothing,
        }
    }
}

/// Scope the principal gets on a resource.
pub fn scope_for(resource: Resource, principal: &Principal) -> Scope {
    rule_for(resource).evaluate(principal)
}

impl Scope {
    /// Whether a row with this owner is visible.
    pub fn admits_owner(&self, owner: Option<i64>) -> bool {
        match self {
            Scope::All => true,
            Scope::OwnedBy(user_id) => owner == Some(*user_id),
            Scope::Nothing => false,
        }
    }

    pub fn admits<T: Owned + ?Sized>(&self, row: &T) -> bool {
        self.admits_owner(row.owner_id())
    }
}
