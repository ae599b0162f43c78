// Format specifier extraction for string and plural values

use crate::model::{FormatArg, FormatKind};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Highest argument position turned into a parameter; specifiers beyond it
/// are ignored
const MAX_FORMAT_POSITION: usize = 64;

/// `%[index$][flags][width][.precision]conversion`
fn format_spec() -> &'static Regex {
    static FORMAT_SPEC: OnceLock<Regex> = OnceLock::new();
    FORMAT_SPEC.get_or_init(|| {
        Regex::new(r"%(?:(\d+)\$)?([-#+0,(<]*)(?:\d+)?(?:\.\d+)?([a-zA-Z%])")
            .expect("format specifier pattern is valid")
    })
}

fn kind_for(conversion: char) -> Option<FormatKind> {
    match conversion {
        's' | 'S' | 'h' | 'H' | 't' | 'T' => Some(FormatKind::Any),
        'd' | 'o' | 'x' | 'X' => Some(FormatKind::Int),
        'e' | 'E' | 'f' | 'g' | 'G' | 'a' | 'A' => Some(FormatKind::Double),
        'c' | 'C' => Some(FormatKind::Char),
        'b' | 'B' => Some(FormatKind::Boolean),
        _ => None,
    }
}

/// Extract the arguments a format string expects, ordered by position.
///
/// Gaps between explicit positions are filled with `Any` so callers can pass
/// arguments positionally.
pub fn extract_format_args(text: &str) -> Vec<FormatArg> {
    fill_gaps(positions(text))
}

fn positions(text: &str) -> BTreeMap<usize, FormatKind> {
    let mut by_position: BTreeMap<usize, FormatKind> = BTreeMap::new();
    let mut next_implicit = 1;
    let mut previous: Option<usize> = None;

    for cap in format_spec().captures_iter(text) {
        let Some(kind) = cap[3].chars().next().and_then(kind_for) else {
            continue;
        };

        let position = if cap[2].contains('<') {
            match previous {
                Some(p) => p,
                None => continue,
            }
        } else if let Some(explicit) = cap.get(1) {
            match explicit.as_str().parse::<usize>() {
                Ok(p) if (1..=MAX_FORMAT_POSITION).contains(&p) => p,
                _ => continue,
            }
        } else if next_implicit <= MAX_FORMAT_POSITION {
            let p = next_implicit;
            next_implicit += 1;
            p
        } else {
            continue;
        };

        by_position.entry(position).or_insert(kind);
        previous = Some(position);
    }

    by_position
}

/// Union of the arguments of several format strings (plural quantities).
/// The first kind seen for a position wins.
pub fn merge_format_args<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<FormatArg> {
    let mut by_position: BTreeMap<usize, FormatKind> = BTreeMap::new();
    for text in texts {
        for (position, kind) in positions(text) {
            by_position.entry(position).or_insert(kind);
        }
    }
    fill_gaps(by_position)
}

fn fill_gaps(by_position: BTreeMap<usize, FormatKind>) -> Vec<FormatArg> {
    let max = by_position.keys().next_back().copied().unwrap_or(0);
    (1..=max)
        .map(|position| FormatArg {
            position,
            kind: by_position.get(&position).copied().unwrap_or(FormatKind::Any),
        })
        .collect()
}
