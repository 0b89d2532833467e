//! Registry domain: user records, input predicates, the deletion policy and
//! the service composing them over the store port.
//!
//! Nothing in here knows about HTTP or a particular database. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! [`ports::UserStore`].

pub mod age_policy;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_registry_service;
pub mod validation;

pub use self::age_policy::{
    DEFAULT_MINIMUM_AGE_MS, DeletionPolicy, StoredTimestamp, TimestampNormalizationError,
    meets_minimum_age,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUserDocument, UserId, UserIdValidationError, UserRecord};
pub use self::user_registry_service::UserRegistryService;
pub use self::validation::{contains_disallowed_script, is_valid_email_shape};
