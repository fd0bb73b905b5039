//! Core profile engine: settings, threshold math, the rule builder, and the
//! per-street generators.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Streets, table positions, game types, postflop styles |
//! | `settings`  | Flat settings mapping with typed, defaulted lookups |
//! | `keys`      | Every documented setting key with its default |
//! | `threshold` | Percentage → `handrank169` threshold conversion |
//! | `helpers`   | Aggression scales, raise sizes, shared condition fragments |
//! | `rules`     | `RuleBlock` / `Script` document model and its serializer |
//! | `generator` | Entry points: one street or the full profile |
//! | `streets`   | Specialized generators grouped by street |

pub mod generator;
pub mod helpers;
pub mod keys;
pub mod models;
pub mod rules;
pub mod settings;
pub mod streets;
pub mod threshold;

pub use generator::{
    build_street, generate_flop, generate_full_profile, generate_preflop, generate_river,
    generate_street, generate_turn,
};
pub use models::{DonkResponse, GameType, Position, Street};
pub use rules::{Action, RuleBlock, Script};
pub use settings::{Number, SettingValue, Settings, Sizing};
pub use threshold::{scale_threshold, threshold};
