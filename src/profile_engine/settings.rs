//! The immutable settings value object every generator reads from.
//!
//! Settings arrive as one flat JSON object of string keys. Values are
//! integers, floats or short strings, and nothing is nested. Every lookup goes
//! through a typed key ([`NumberKey`], [`SizingKey`], [`TextKey`]) that carries
//! the documented default, so a partial mapping never fails. A value that is
//! present but unusable (non-numeric text where a number is expected, an
//! unknown style name) fails fast with [`ProfileError::InvalidValue`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ProfileError, Result};
use crate::profile_engine::{helpers::decimal, keys};

// ---------------------------------------------------------------------------
// Raw values
// ---------------------------------------------------------------------------

/// One raw settings value, as it appears in the JSON mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(v.into())
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Float(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Int(n)   => write!(f, "{n}"),
            SettingValue::Float(x) => write!(f, "{}", decimal(*x)),
            SettingValue::Text(s)  => write!(f, "{s:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed values
// ---------------------------------------------------------------------------

/// A numeric setting that remembers whether it was written as an integer,
/// so header echoes print `70` for `70` and `70.0` for `70.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn value(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    /// The value as a signed fraction (`-20` → `-0.2`).
    pub fn fraction(self) -> f64 {
        self.value() / 100.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{}", decimal(*x)),
        }
    }
}

impl From<Number> for SettingValue {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(v) => SettingValue::Int(v),
            Number::Float(v) => SettingValue::Float(v),
        }
    }
}

/// A bet size written as text (`"2.5"`, `"66"`). Echoed verbatim, computed
/// with as a float.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    raw: String,
    value: f64,
}

impl Sizing {
    pub fn parse(key: &str, raw: &str) -> Result<Sizing> {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Sizing { raw: raw.to_string(), value }),
            _ => Err(ProfileError::invalid(key, "a numeric bet size", raw)),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberKey {
    pub name: &'static str,
    pub default: Number,
}

impl NumberKey {
    pub const fn int(name: &'static str, default: i64) -> Self {
        NumberKey { name, default: Number::Int(default) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingKey {
    pub name: &'static str,
    pub default: &'static str,
}

impl SizingKey {
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        SizingKey { name, default }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextKey {
    pub name: &'static str,
    pub default: &'static str,
}

impl TextKey {
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        TextKey { name, default }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    /// An empty mapping: every lookup resolves to its documented default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: BTreeMap<String, SettingValue>) -> Self {
        Settings { values }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        debug!(keys = settings.values.len(), "parsed settings");
        Ok(settings)
    }

    /// Read a settings JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Return a copy with `key` set to `value`.
    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every documented key at its default, as pretty JSON.
    pub fn defaults_json() -> Result<String> {
        keys::documented_defaults().to_json_pretty()
    }

    /// First present key among `names`.
    fn lookup<'a>(&'a self, names: &[&'a str]) -> Option<(&'a str, &'a SettingValue)> {
        names
            .iter()
            .find_map(|name| self.values.get(*name).map(|v| (*name, v)))
    }

    pub fn number(&self, key: NumberKey) -> Result<Number> {
        self.number_named(key.name, key.default)
    }

    /// Numeric lookup for keys built at runtime (the push/fold table).
    pub fn number_named(&self, name: &str, default: Number) -> Result<Number> {
        self.number_layered(&[name], default)
    }

    /// Numeric lookup through a list of keys, most specific first.
    pub fn number_layered(&self, names: &[&str], default: Number) -> Result<Number> {
        match self.lookup(names) {
            Some((name, value)) => to_number(name, value),
            None => {
                trace!(key = names.first().copied().unwrap_or_default(), "using default");
                Ok(default)
            }
        }
    }

    /// Shorthand for `number(key)?.value()`.
    pub fn percent(&self, key: NumberKey) -> Result<f64> {
        Ok(self.number(key)?.value())
    }

    pub fn sizing(&self, key: SizingKey) -> Result<Sizing> {
        self.sizing_layered(&[key.name], key.default)
    }

    pub fn sizing_layered(&self, names: &[&str], default: &str) -> Result<Sizing> {
        match self.lookup(names) {
            Some((name, SettingValue::Text(raw))) => Sizing::parse(name, raw),
            Some((name, SettingValue::Int(n))) => Sizing::parse(name, &n.to_string()),
            Some((name, SettingValue::Float(x))) => Sizing::parse(name, &decimal(*x)),
            None => {
                trace!(key = names.first().copied().unwrap_or_default(), "using default");
                Sizing::parse(names.first().copied().unwrap_or_default(), default)
            }
        }
    }

    pub fn text(&self, key: TextKey) -> Result<&str> {
        match self.values.get(key.name) {
            Some(SettingValue::Text(s)) => Ok(s.as_str()),
            Some(other) => Err(ProfileError::invalid(key.name, "a text value", other)),
            None => {
                trace!(key = key.name, "using default");
                Ok(key.default)
            }
        }
    }

    /// Text lookup parsed into an enumerated type.
    pub fn parsed<T>(&self, key: TextKey) -> Result<T>
    where
        T: FromStr<Err = ProfileError>,
    {
        self.text(key)?.parse()
    }
}

fn to_number(key: &str, value: &SettingValue) -> Result<Number> {
    match value {
        SettingValue::Int(n) => Ok(Number::Int(*n)),
        SettingValue::Float(x) if x.is_finite() => Ok(Number::Float(*x)),
        SettingValue::Float(x) => Err(ProfileError::invalid(key, "a finite number", x)),
        SettingValue::Text(s) => {
            let t = s.trim();
            if let Ok(n) = t.parse::<i64>() {
                Ok(Number::Int(n))
            } else {
                match t.parse::<f64>() {
                    Ok(x) if x.is_finite() => Ok(Number::Float(x)),
                    _ => Err(ProfileError::invalid(key, "a number", value)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREQ: NumberKey = NumberKey::int("ip_cbet_freq", 70);
    const SIZE: SizingKey = SizingKey::new("ip_cbet_size", "50");
    const STYLE: TextKey = TextKey::new("game_type", "Cash Game");

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s = Settings::new();
        assert_eq!(s.number(FREQ).unwrap(), Number::Int(70));
        assert_eq!(s.sizing(SIZE).unwrap().raw(), "50");
        assert_eq!(s.text(STYLE).unwrap(), "Cash Game");
    }

    #[test]
    fn json_keeps_int_float_distinction() {
        let s = Settings::from_json_str(r#"{"ip_cbet_freq": 70.0, "aggression": 65}"#).unwrap();
        assert_eq!(s.number(FREQ).unwrap(), Number::Float(70.0));
        assert_eq!(s.number(FREQ).unwrap().to_string(), "70.0");
        assert_eq!(s.get("aggression"), Some(&SettingValue::Int(65)));
    }

    #[test]
    fn numeric_text_is_accepted() {
        let s = Settings::new().with("ip_cbet_freq", " 55 ");
        assert_eq!(s.number(FREQ).unwrap(), Number::Int(55));
    }

    #[test]
    fn non_numeric_text_fails_fast() {
        let s = Settings::new().with("ip_cbet_freq", "lots");
        let err = s.number(FREQ).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidValue { ref key, .. } if key == "ip_cbet_freq"));
        assert!(err.to_string().contains("ip_cbet_freq"));
    }

    #[test]
    fn bad_sizing_fails_fast() {
        let s = Settings::new().with("ip_cbet_size", "half pot");
        assert!(s.sizing(SIZE).is_err());
    }

    #[test]
    fn numeric_sizing_is_echoed_like_text() {
        let s = Settings::new().with("ip_cbet_size", 66);
        let size = s.sizing(SIZE).unwrap();
        assert_eq!(size.raw(), "66");
        assert_eq!(size.value(), 66.0);
    }

    #[test]
    fn layered_lookup_prefers_the_specific_key() {
        let s = Settings::new().with("ep_range", 15);
        let d = Number::Int(10);
        assert_eq!(s.number_layered(&["ep1_range", "ep_range"], d).unwrap(), Number::Int(15));
        let s = s.with("ep1_range", 9);
        assert_eq!(s.number_layered(&["ep1_range", "ep_range"], d).unwrap(), Number::Int(9));
        assert_eq!(Settings::new().number_layered(&["ep1_range", "ep_range"], d).unwrap(), d);
    }

    #[test]
    fn text_key_rejects_numbers() {
        let s = Settings::new().with("game_type", 3);
        assert!(s.text(STYLE).is_err());
    }

    #[test]
    fn defaults_json_round_trips() {
        let json = Settings::defaults_json().unwrap();
        let parsed = Settings::from_json_str(&json).unwrap();
        assert_eq!(parsed, keys::documented_defaults());
        assert_eq!(parsed.number(FREQ).unwrap(), Number::Int(70));
    }

    #[test]
    fn from_map_matches_builder() {
        let map = BTreeMap::from([
            ("ip_cbet_freq".to_string(), SettingValue::Float(72.5)),
            ("game_type".to_string(), SettingValue::from("Tournament")),
        ]);
        let built = Settings::new().with("ip_cbet_freq", 72.5).with("game_type", "Tournament");
        assert_eq!(Settings::from_map(map), built);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json_str("{"), Err(ProfileError::Json(_))));
        assert!(Settings::from_json_str(r#"{"nested": {"a": 1}}"#).is_err());
    }
}
