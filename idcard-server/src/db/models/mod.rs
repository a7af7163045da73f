//! Database Models
//!
//! Serde models matching the SurrealDB tables. Record IDs travel as
//! "table:key" strings on the wire via [`serde_helpers`].

pub mod card_template;
pub mod member;
pub mod serde_helpers;
pub mod settings;

pub use card_template::{
    CardLayout, CardTemplate, CardTemplateCreate, CardTemplateUpdate, ColorScheme,
};
pub use member::{
    Designation, Member, MemberCreate, MemberFilter, MemberId, MemberStats, MemberUpdate,
    StatusFilter,
};
pub use settings::{OrgSettings, OrgSettingsUpdate};
