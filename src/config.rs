use crate::parser::ResponseParser;
use serde::{Deserialize, Serialize};

/// Upper bound on cells (and so on outstanding requests) per populate.
pub const MAX_CELLS: usize = 64;
pub const DEFAULT_CELL_COUNT: usize = 9;
pub const SETTINGS_KEY: &str = "mg_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub label: &'static str,
    pub url: &'static str,
    pub parser: ResponseParser,
}

/// Buttons shown in the controls panel, in display order. The first one
/// also fills the grid on startup.
pub const ENDPOINTS: [Endpoint; 3] = [
    Endpoint {
        label: "More cats",
        url: "https://api.thecatapi.com/v1/images/search",
        parser: ResponseParser::Json,
    },
    Endpoint {
        label: "More dogs",
        url: "https://random.dog/woof.json",
        parser: ResponseParser::Json,
    },
    Endpoint {
        label: "Random picture",
        url: "https://picsum.photos/400",
        parser: ResponseParser::Identity,
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cell_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_count: DEFAULT_CELL_COUNT,
        }
    }
}

impl Settings {
    /// Parses persisted settings, falling back to defaults on anything unreadable.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Settings>(raw) {
            Ok(mut s) => {
                s.cell_count = s.cell_count.min(MAX_CELLS);
                s
            }
            Err(e) => {
                log::warn!("ignoring stored settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(SETTINGS_KEY) {
                    return Settings::from_json(&raw);
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(SETTINGS_KEY, &s);
                }
            }
        }
    }
}

/// Reads the "how many" input. A blank input means zero cells, garbage
/// yields `None`; numbers are clamped to `0..=MAX_CELLS`.
pub fn parse_cell_count(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n <= 0 => Some(0),
        Ok(n) => Some((n as u64).min(MAX_CELLS as u64) as usize),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_count_input_is_clamped() {
        assert_eq!(parse_cell_count("12"), Some(12));
        assert_eq!(parse_cell_count(" 3 "), Some(3));
        assert_eq!(parse_cell_count("-4"), Some(0));
        assert_eq!(parse_cell_count("100000"), Some(MAX_CELLS));
        assert_eq!(parse_cell_count(""), Some(0));
        assert_eq!(parse_cell_count("   "), Some(0));
        assert_eq!(parse_cell_count("many"), None);
        assert_eq!(parse_cell_count("2.5"), None);
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_json("{oops"), Settings::default());
        assert_eq!(Settings::from_json("{}"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"cell_count":4}"#).cell_count, 4);
        assert_eq!(
            Settings::from_json(r#"{"cell_count":999}"#).cell_count,
            MAX_CELLS
        );
    }

    #[test]
    fn catalog_has_one_identity_endpoint() {
        let identity: Vec<_> = ENDPOINTS
            .iter()
            .filter(|e| e.parser == ResponseParser::Identity)
            .collect();
        assert_eq!(identity.len(), 1);
        assert!(ENDPOINTS.iter().all(|e| !e.url.is_empty()));
    }
}
