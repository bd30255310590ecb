//! Comma-separated deck files stored next to a text save.
//!
//! ```text
//! <card count>
//! <type>,<name>,<description>,<mana cost>,<v1>,<v2>
//! ```
//!
//! Creatures store attack and health, spells their effect and a `0`,
//! buildings durability and boost. Fields are not quoted, so names and
//! descriptions must not contain commas or line breaks.

use std::path::{Path, PathBuf};

use crate::cards::{Card, CardBody, CardKind};
use crate::core::PlayerId;
use crate::error::{PersistError, PersistResult};

/// `<save>.deck<seat index>`.
#[must_use]
pub fn path_for(save: &Path, player: PlayerId) -> PathBuf {
    let mut name = save.as_os_str().to_owned();
    name.push(format!(".deck{}", player.index()));
    PathBuf::from(name)
}

/// Render a deck, top card first.
pub fn encode(cards: &[Card]) -> PersistResult<String> {
    let mut out = format!("{}\n", cards.len());
    for card in cards {
        check_field(&card.name, "card name")?;
        check_field(&card.description, "card description")?;
        let (v1, v2) = match &card.body {
            CardBody::Creature(c) => (c.attack, c.health),
            CardBody::Spell(s) => (s.effect_value, 0),
            CardBody::Building(b) => (b.durability, b.boost),
        };
        out.push_str(&format!(
            "{},{},{},{},{v1},{v2}\n",
            card.kind().code(),
            card.name,
            card.description,
            card.mana_cost
        ));
    }
    Ok(out)
}

fn check_field(text: &str, what: &str) -> PersistResult<()> {
    if text.contains([',', '\n', '\r']) {
        return Err(PersistError::Unencodable(format!(
            "{what} {text:?} contains a comma or line break"
        )));
    }
    Ok(())
}

/// Parse a deck file. Creatures come back unhurt and summoning-sick.
pub fn decode(text: &str) -> PersistResult<Vec<Card>> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let (_, header) = lines.next().ok_or_else(|| parse_error(1, "missing card count"))?;
    let count: usize = header
        .trim()
        .parse()
        .map_err(|_| parse_error(1, format!("expected a card count, found {header:?}")))?;

    let mut cards = Vec::with_capacity(count);
    for index in 0..count {
        let (number, line) = lines
            .next()
            .ok_or_else(|| parse_error(index + 2, format!("expected {count} cards, found {index}")))?;
        cards.push(decode_line(number, line)?);
    }

    if let Some((number, extra)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(parse_error(number, format!("unexpected data after {count} cards: {extra:?}")));
    }
    Ok(cards)
}

fn parse_error(line: usize, message: impl Into<String>) -> PersistError {
    PersistError::Parse {
        line,
        message: message.into(),
    }
}

fn decode_line(number: usize, line: &str) -> PersistResult<Card> {
    let fields: Vec<&str> = line.split(',').collect();
    let [code, name, description, cost, v1, v2] = fields[..] else {
        return Err(parse_error(number, format!("expected 6 fields, found {}", fields.len())));
    };
    let int = |field: &str| -> PersistResult<i32> {
        field
            .trim()
            .parse()
            .map_err(|_| parse_error(number, format!("expected an integer, found {field:?}")))
    };

    let code: i64 = code
        .trim()
        .parse()
        .map_err(|_| parse_error(number, format!("expected a card type code, found {code:?}")))?;
    let (cost, v1, v2) = (int(cost)?, int(v1)?, int(v2)?);

    Ok(match CardKind::from_code(code).ok_or(PersistError::UnknownCardType(code))? {
        CardKind::Creature => Card::creature(name, description, cost, v1, v2),
        CardKind::Spell => Card::spell(name, description, cost, v1),
        CardKind::Building => Card::building(name, description, cost, v1, v2),
    })
}
