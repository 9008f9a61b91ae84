//! `netrecon-config` — settings for endpoints, credentials, and the router
//! directory override.

mod settings;

pub use settings::{
    load, load_from, save_to, settings_path, AuditSettings, BillingSettings, RouterEntry, Settings,
};
