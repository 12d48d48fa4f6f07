//! Small text helpers shared by the library pipeline and the CLI.

use std::cmp::Ordering;

/// Decode HTML entities in catalog names.
///
/// Game names synced from the catalog arrive HTML-escaped (`Tzolk&#039;in`,
/// `Dungeons &amp; Dragons`). Named entities in common use and numeric
/// references are decoded; anything unrecognised is left as-is.
pub fn decode_html_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities are short; don't scan past the next whitespace or '&'.
        let end = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|i| i + 1);

        match end {
            Some(semi) if tail.as_bytes()[semi] == b';' => match decode_entity(&tail[1..semi]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        _ => return None,
    };
    Some(c)
}

/// Locale-style string comparison.
///
/// Primary order ignores case; strings that differ only in case put the
/// lowercase form first (`"catan" < "Catan"`), matching how a collating
/// comparison behaves in an English locale.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary.then_with(|| {
        for (ca, cb) in a.chars().zip(b.chars()) {
            if ca != cb {
                // Same letter, different case: lowercase sorts first.
                return match (ca.is_lowercase(), cb.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => ca.cmp(&cb),
                };
            }
        }
        a.len().cmp(&b.len())
    })
}

/// Avatar initials for a display name: first letter of the first two words.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(decode_html_entities("Tzolk&#039;in"), "Tzolk'in");
        assert_eq!(decode_html_entities("Dungeons &amp; Dragons"), "Dungeons & Dragons");
        assert_eq!(decode_html_entities("&quot;Quoted&quot;"), "\"Quoted\"");
        assert_eq!(decode_html_entities("Caf&#xE9;"), "Café");
        assert_eq!(decode_html_entities("A &ndash; B"), "A \u{2013} B");
    }

    #[test]
    fn keeps_unknown_or_malformed_entities() {
        assert_eq!(decode_html_entities("Fish &chips;"), "Fish &chips;");
        assert_eq!(decode_html_entities("Rock & Roll"), "Rock & Roll");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
        assert_eq!(decode_html_entities("&amp"), "&amp");
        assert_eq!(decode_html_entities("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(decode_html_entities("Wingspan"), "Wingspan");
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Banana", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("catan", "Catan"), Ordering::Less);
        assert_eq!(locale_cmp("Catan", "Catan"), Ordering::Equal);
        assert_eq!(locale_cmp("Cat", "Catan"), Ordering::Less);
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace brewster hopper"), "GB");
        assert_eq!(initials("Prince"), "P");
        assert_eq!(initials("   "), "?");
        assert_eq!(initials(""), "?");
    }
}
