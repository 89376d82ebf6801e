use lazy_static::lazy_static;
use regex::Regex;

use super::message::{CardField, PlaceCard, RenderedMessage};

lazy_static! {
    /// Keywords that mark a reply as describing places
    static ref MARKER_RE: Regex = Regex::new(
        r"(?i)(harga\s+tiket|fasilitas|jam\s+operasi(?:onal)?|jam\s+buka|lokasi\s*:|kategori\s*:)"
    )
    .unwrap();

    /// Numbered list item at the start of a line ("1. ", "12. ")
    static ref ITEM_SPLIT_RE: Regex = Regex::new(r"(?m)^[ \t]*\d+\.\s+").unwrap();

    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();

    /// Leading emoji and decoration before the first letter, digit or markup char
    static ref LEADING_DECORATION_RE: Regex = Regex::new(r"^[^\p{L}\p{N}(*_\-•]+").unwrap();

    static ref BULLET_RE: Regex = Regex::new(r"^(?:[-•]|\*)\s+(.+)$").unwrap();

    static ref CATEGORY_LINE_RE: Regex = Regex::new(r"^\(([^()]+)\)$").unwrap();

    static ref NAME_WITH_CATEGORY_RE: Regex = Regex::new(r"^(.+?)\s*\(([^()]+)\)$").unwrap();

    static ref TAGLINE_RE: Regex = Regex::new(r"^(?:\*([^*\s][^*]*)\*|_([^_\s][^_]*)_)$").unwrap();

    static ref FIELD_RE: Regex = Regex::new(r"^([\p{L}][\p{L} /&]{0,39}?)\s*:\s*(.*)$").unwrap();
}

/// Turns assistant reply text into a renderable message.
///
/// Returns `None` when the text does not fit the parser's format; callers
/// then fall back to [`RenderedMessage::Text`].
pub trait MessageParser: Send + Sync {
    fn parse(&self, text: &str) -> Option<RenderedMessage>;
}

/// Parse with `parser`, falling back to the unmodified text
pub fn render_message(parser: &dyn MessageParser, text: &str) -> RenderedMessage {
    parser.parse(text).unwrap_or_else(|| {
        tracing::debug!("Chat reply rendered as plain text");
        RenderedMessage::plain(text)
    })
}

/// Scrapes "place cards" out of the chatbot's free-form tourism answers
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceCardParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownKey {
    Lokasi,
    HargaTiket,
    JamOperasi,
    Fasilitas,
    Kategori,
}

fn known_key(label: &str) -> Option<KnownKey> {
    let normalized = label.trim().to_lowercase();
    match normalized.as_str() {
        "lokasi" | "alamat" => Some(KnownKey::Lokasi),
        "harga tiket" | "harga" | "tiket masuk" => Some(KnownKey::HargaTiket),
        "jam operasi" | "jam operasional" | "jam buka" => Some(KnownKey::JamOperasi),
        "fasilitas" => Some(KnownKey::Fasilitas),
        "kategori" => Some(KnownKey::Kategori),
        _ => None,
    }
}

fn has_details(card: &PlaceCard) -> bool {
    !card.fields.is_empty() || !card.facilities.is_empty()
}

impl PlaceCardParser {
    fn apply_field(card: &mut PlaceCard, label: &str, value: &str) {
        match known_key(label) {
            Some(KnownKey::Fasilitas) => {
                card.facilities.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(String::from),
                );
                return;
            }
            Some(KnownKey::Kategori) => card.category = Some(value.to_string()),
            Some(KnownKey::Lokasi) => card.lokasi = Some(value.to_string()),
            Some(KnownKey::HargaTiket) => card.harga_tiket = Some(value.to_string()),
            Some(KnownKey::JamOperasi) => card.jam_operasi = Some(value.to_string()),
            None => {}
        }

        card.fields.push(CardField {
            label: label.trim().to_string(),
            value: value.to_string(),
        });
    }

    fn classify_line(card: &mut PlaceCard, raw: &str) {
        let unbolded = BOLD_RE.replace_all(raw.trim(), "$1");
        let line = LEADING_DECORATION_RE.replace(&unbolded, "");
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if let Some(caps) = BULLET_RE.captures(line) {
            let item = caps[1].trim();
            if let Some(field) = FIELD_RE.captures(item) {
                if known_key(&field[1]).is_some() && !field[2].trim().is_empty() {
                    Self::apply_field(card, &field[1], field[2].trim());
                    return;
                }
            }
            card.facilities.push(item.to_string());
            return;
        }

        if let Some(caps) = CATEGORY_LINE_RE.captures(line) {
            card.category = Some(caps[1].trim().to_string());
            return;
        }

        if let Some(caps) = TAGLINE_RE.captures(line) {
            let text = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            if let Some(text) = text {
                card.tagline = Some(text.trim().to_string());
                return;
            }
        }

        if let Some(caps) = FIELD_RE.captures(line) {
            let label = &caps[1];
            let value = caps[2].trim();
            let looks_like_url = value.starts_with("//");
            if !looks_like_url && (!value.is_empty() || known_key(label).is_some()) {
                if !value.is_empty() {
                    Self::apply_field(card, label, value);
                }
                return;
            }
        }

        if card.name.is_none() && !line.ends_with(':') {
            match NAME_WITH_CATEGORY_RE.captures(line) {
                Some(caps) => {
                    card.name = Some(caps[1].trim().to_string());
                    if card.category.is_none() {
                        card.category = Some(caps[2].trim().to_string());
                    }
                }
                None => card.name = Some(line.to_string()),
            }
            return;
        }

        card.notes.push(line.to_string());
    }

    fn parse_card(segment: &str) -> PlaceCard {
        let mut card = PlaceCard::default();
        for line in segment.lines() {
            Self::classify_line(&mut card, line);
        }
        card
    }
}

impl MessageParser for PlaceCardParser {
    fn parse(&self, text: &str) -> Option<RenderedMessage> {
        if !MARKER_RE.is_match(text) {
            return None;
        }

        let segments: Vec<&str> = ITEM_SPLIT_RE.split(text).collect();
        let (intro, bodies) = if segments.len() > 1 {
            let intro = segments[0].trim();
            let intro = (!intro.is_empty()).then(|| intro.to_string());
            (intro, &segments[1..])
        } else {
            (None, &segments[..])
        };

        let cards: Vec<PlaceCard> = bodies
            .iter()
            .map(|segment| Self::parse_card(segment))
            .filter(|card| !card.is_empty())
            .collect();

        if !cards.iter().any(has_details) {
            return None;
        }

        Some(RenderedMessage::Cards { intro, cards })
    }
}
