//! User record model.
//!
//! A user has a store-assigned integer id plus three required attributes.
//! The newtypes here make an invalid record unrepresentable: a [`NewUser`]
//! cannot exist without every required field, and a [`UserPatch`] only
//! carries the fields a caller actually supplied.

use std::fmt;

/// Attribute names used in validation errors and wire payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// `full_name`
    FullName,
    /// `role`
    Role,
    /// `efficiency`
    Efficiency,
}

impl UserField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Role => "role",
            Self::Efficiency => "efficiency",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// A required field was not supplied.
    MissingField { field: UserField },
    /// A field was supplied as `null`.
    NullField { field: UserField },
    /// A text field was empty or whitespace.
    EmptyField { field: UserField },
    /// The identifier is outside the range the store assigns.
    InvalidId { value: i64 },
}

impl UserValidationError {
    /// Field the error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<UserField> {
        match self {
            Self::MissingField { field } | Self::NullField { field } | Self::EmptyField { field } => {
                Some(*field)
            }
            Self::InvalidId { .. } => None,
        }
    }

    /// Stable code describing the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::NullField { .. } => "null_field",
            Self::EmptyField { .. } => "empty_field",
            Self::InvalidId { .. } => "invalid_id",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::NullField { field } => write!(f, "{field} must not be null"),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidId { value } => write!(f, "user id {value} is out of range"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use userbase::domain::UserId;
    ///
    /// assert_eq!(UserId::new(1).map(UserId::get), Ok(1));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(raw: i32) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::InvalidId {
                value: i64::from(raw),
            });
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .map_err(|_| UserValidationError::InvalidId { value })
            .and_then(Self::new)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! required_text {
    ($(#[$meta:meta])* $name:ident => $field:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the value; whitespace-only input is rejected.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(UserValidationError::EmptyField { field: $field });
                }
                Ok(Self(value))
            }

            /// Borrow the text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the text.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

required_text! {
    /// Person's full name.
    FullName => UserField::FullName
}

required_text! {
    /// Role label, matched exactly when filtering.
    Role => UserField::Role
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    full_name: FullName,
    role: Role,
    efficiency: i32,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, full_name: FullName, role: Role, efficiency: i32) -> Self {
        Self {
            id,
            full_name,
            role,
            efficiency,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Role label.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Efficiency score.
    #[must_use]
    pub fn efficiency(&self) -> i32 {
        self.efficiency
    }

    /// Return a copy with the supplied patch fields applied.
    #[must_use]
    pub fn patched(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id,
            full_name: patch
                .full_name
                .clone()
                .unwrap_or_else(|| self.full_name.clone()),
            role: patch.role.clone().unwrap_or_else(|| self.role.clone()),
            efficiency: patch.efficiency.unwrap_or(self.efficiency),
        }
    }
}

/// Validated creation request; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    full_name: FullName,
    role: Role,
    efficiency: i32,
}

impl NewUser {
    /// Bundle the required attributes.
    #[must_use]
    pub fn new(full_name: FullName, role: Role, efficiency: i32) -> Self {
        Self {
            full_name,
            role,
            efficiency,
        }
    }

    /// Full name.
    #[must_use]
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Role label.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Efficiency score.
    #[must_use]
    pub fn efficiency(&self) -> i32 {
        self.efficiency
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.full_name, self.role, self.efficiency)
    }
}

/// Partial update. Fields left as `None` keep their stored value.
///
/// # Examples
/// ```
/// use userbase::domain::UserPatch;
///
/// let patch = UserPatch::default().with_efficiency(9);
/// assert!(!patch.is_empty());
/// assert!(UserPatch::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    full_name: Option<FullName>,
    role: Option<Role>,
    efficiency: Option<i32>,
}

impl UserPatch {
    /// Replace the full name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: FullName) -> Self {
        self.full_name = Some(full_name);
        self
    }

    /// Replace the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Replace the efficiency score.
    #[must_use]
    pub fn with_efficiency(mut self, efficiency: i32) -> Self {
        self.efficiency = Some(efficiency);
        self
    }

    /// New full name, if supplied.
    #[must_use]
    pub fn full_name(&self) -> Option<&FullName> {
        self.full_name.as_ref()
    }

    /// New role, if supplied.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// New efficiency score, if supplied.
    #[must_use]
    pub fn efficiency(&self) -> Option<i32> {
        self.efficiency
    }

    /// True when no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.role.is_none() && self.efficiency.is_none()
    }
}

/// Listing filter. The default matches every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    role: Option<Role>,
}

impl UserFilter {
    /// Match every user.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match users whose role equals `role` exactly.
    #[must_use]
    pub fn by_role(role: Role) -> Self {
        Self { role: Some(role) }
    }

    /// Role constraint, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Whether `user` passes the filter.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.role.as_ref().is_none_or(|role| user.role() == role)
    }
}
