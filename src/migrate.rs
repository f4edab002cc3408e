//! This module contains the schema migration chain for persisted puzzle
//! documents.
//!
//! Documents declare their schema with a float-like `version` tag. Loading a
//! file whose version is older than [CURRENT_VERSION](crate::CURRENT_VERSION)
//! applies every missing upgrade step in ascending order, then stamps the
//! current version. The chain operates on raw JSON so that hand-edited or
//! very old files are repaired with documented defaults instead of being
//! rejected; the only hard failures are inputs that are not a JSON object at
//! all.
//!
//! Migration is deterministic and idempotent: a document at the current
//! version passes through without any field being touched.

use crate::Puzzle;
use crate::error::{LoadError, LoadResult};

use serde_json::map::Map;
use serde_json::{Value, json};

/// The string tags of the `type` field this crate understands. Anything else
/// is replaced by `"default"` during migration.
const KNOWN_VARIANT_TAGS: [&str; 7] =
    ["default", "12x12", "16x16", "samurai", "squiggly", "x", "other"];

/// A small table of color names that old documents are known to contain,
/// mapped to their 6-hex-digit form.
const NAMED_COLORS: [(&str, &str); 23] = [
    ("aqua", "#00ffff"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("brown", "#a52a2a"),
    ("cyan", "#00ffff"),
    ("fuchsia", "#ff00ff"),
    ("gold", "#ffd700"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("grey", "#808080"),
    ("lime", "#00ff00"),
    ("magenta", "#ff00ff"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("silver", "#c0c0c0"),
    ("teal", "#008080"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00")
];

/// Normalizes any valid color representation to the fixed 6-hex-digit form
/// `#rrggbb`: hex colors are lowercased and the `#rgb` shorthand is expanded,
/// known color names are resolved via [NAMED_COLORS]. Anything else passes
/// through unchanged - normalization is best-effort, never an error.
fn normalize_color(color: &str) -> String {
    let lower = color.trim().to_ascii_lowercase();

    if let Some(digits) = lower.strip_prefix('#') {
        if digits.len() == 3 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            let mut expanded = String::from("#");

            for c in digits.chars() {
                expanded.push(c);
                expanded.push(c);
            }

            return expanded;
        }

        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return lower;
        }

        return String::from(color);
    }

    for &(name, hex) in NAMED_COLORS.iter() {
        if name == lower {
            return String::from(hex);
        }
    }

    String::from(color)
}

fn for_each_cell(root: &mut Map<String, Value>,
        mut f: impl FnMut(&mut Map<String, Value>)) {
    if let Some(rows) = root.get_mut("cells").and_then(Value::as_array_mut) {
        for row in rows {
            if let Some(cells) = row.as_array_mut() {
                for cell in cells {
                    if let Some(cell) = cell.as_object_mut() {
                        f(cell);
                    }
                }
            }
        }
    }
}

fn for_each_style(root: &mut Map<String, Value>, key: &str,
        mut f: impl FnMut(&mut Map<String, Value>)) {
    if let Some(entries) = root.get_mut(key).and_then(Value::as_array_mut) {
        for entry in entries {
            if let Some(entry) = entry.as_object_mut() {
                f(entry);
            }
        }
    }
}

/// Step for documents older than 1.1: converts the legacy boolean `isGuess`
/// flag per cell into the indexed-guess model (`true` becomes guess index 1,
/// `false` becomes guess index 0) and installs the two default guess styles.
fn to_indexed_guesses(root: &mut Map<String, Value>) {
    for_each_cell(root, |cell| {
        let is_guess = cell.remove("isGuess")
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let index = if is_guess { 1 } else { 0 };
        cell.insert(String::from("guessIndex"), json!(index));
    });

    root.insert(String::from("guesses"), json!([
        {
            "color": "#000000",
            "isSmall": false
        },
        {
            "color": "#0000ff",
            "isSmall": false
        }
    ]));
}

/// Step for documents older than 1.2: normalizes every stored group and
/// guess color to the fixed 6-hex-digit form.
fn to_normalized_colors(root: &mut Map<String, Value>) {
    for &key in ["groups", "guesses"].iter() {
        for_each_style(root, key, |entry| {
            if let Some(color) =
                    entry.get("color").and_then(Value::as_str) {
                let normalized = normalize_color(color);
                entry.insert(String::from("color"), json!(normalized));
            }
        });
    }
}

/// Step for documents older than 1.3: defaults the `type` field to
/// `"default"` if it is absent or not a known tag.
fn to_defaulted_variant(root: &mut Map<String, Value>) {
    let known = root.get("type")
        .and_then(Value::as_str)
        .map(|tag| KNOWN_VARIANT_TAGS.contains(&tag))
        .unwrap_or(false);

    if !known {
        root.insert(String::from("type"), json!("default"));
    }
}

/// Step for documents older than 1.4: defaults `editable` to `true` on every
/// guess style lacking the field.
fn to_editable_styles(root: &mut Map<String, Value>) {
    for_each_style(root, "guesses", |entry| {
        if !entry.contains_key("editable") {
            entry.insert(String::from("editable"), json!(true));
        }
    });
}

/// Step for documents older than 1.5: inserts the default small
/// (pencil-mark) guess style at index 2, shifting every cell whose guess
/// index was 2 or greater up by one to preserve references, and initializes
/// the elapsed play time to zero.
fn to_small_style(root: &mut Map<String, Value>) {
    let small = json!({
        "color": "#808080",
        "isSmall": true,
        "editable": true
    });

    match root.get_mut("guesses").and_then(Value::as_array_mut) {
        Some(guesses) => {
            let index = guesses.len().min(2);
            guesses.insert(index, small);
        },
        None => {
            root.insert(String::from("guesses"), json!([small]));
        }
    }

    for_each_cell(root, |cell| {
        if let Some(index) = cell.get("guessIndex").and_then(Value::as_i64) {
            if index >= 2 {
                cell.insert(String::from("guessIndex"), json!(index + 1));
            }
        }
    });

    root.insert(String::from("elapsedSeconds"), json!(0));
}

/// Upgrades a raw JSON document to the current schema and deserializes it.
/// Steps are applied in ascending order; a document declaring version 1.0
/// passes through every step. After all applicable steps, the version is
/// stamped to the current value and the document is repaired so that the
/// repository-wide index and shape invariants hold.
///
/// # Errors
///
/// * `LoadError::NotAnObject` if the top-level value is not a JSON object.
/// * `LoadError::MalformedJson` if the migrated document still cannot be
/// deserialized (which only structurally alien input can trigger).
pub fn migrate(mut raw: Value) -> LoadResult<Puzzle> {
    let root = raw.as_object_mut().ok_or(LoadError::NotAnObject)?;
    let version = root.get("version").and_then(Value::as_f64).unwrap_or(1.0);

    if version < 1.1 {
        log::debug!("migrating document to schema 1.1 (indexed guesses)");
        to_indexed_guesses(root);
    }

    if version < 1.2 {
        log::debug!("migrating document to schema 1.2 (normalized colors)");
        to_normalized_colors(root);
    }

    if version < 1.3 {
        log::debug!("migrating document to schema 1.3 (variant tag)");
        to_defaulted_variant(root);
    }

    if version < 1.4 {
        log::debug!("migrating document to schema 1.4 (editable styles)");
        to_editable_styles(root);
    }

    if version < 1.5 {
        log::debug!("migrating document to schema 1.5 (small style, timer)");
        to_small_style(root);
    }

    let mut puzzle: Puzzle = serde_json::from_value(raw)?;
    puzzle.stamp_current_version();
    puzzle.normalize();
    Ok(puzzle)
}

/// Parses the given string as JSON and upgrades it to the current schema via
/// [migrate].
///
/// # Errors
///
/// `LoadError::MalformedJson` if the input is not JSON, plus anything
/// [migrate] raises.
pub fn load(contents: &str) -> LoadResult<Puzzle> {
    let raw: Value = serde_json::from_str(contents)?;
    migrate(raw)
}
