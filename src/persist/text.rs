//! Line-oriented text save format.
//!
//! ```text
//! <current player index>
//! per player:
//!   <name>
//!   <health> <max health>
//!   <mana> <max mana> <mana regeneration>
//!   <hand count>
//!   per hand card: card record
//!   per slot: "empty" or card record
//! ```
//!
//! A card record is five lines: type code, name, description, mana cost and
//! a type line (creature `<attack> <health> <max health> <0|1>`, spell
//! `<effect>`, building `<durability> <boost>`). Decks live in separate
//! files next to the save, see [`super::deck_file`].

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::cards::{Building, Card, CardBody, CardKind, Creature, Spell};
use crate::core::{BoardConfig, GameState, PlayerId};
use crate::error::{PersistError, PersistResult};

use super::deck_file;
use super::schema::{PlayerRecord, SaveFile};

const EMPTY_SLOT: &str = "empty";

/// Render a save file. Decks are not included.
pub fn encode(file: &SaveFile) -> PersistResult<String> {
    let mut out = String::new();
    line(&mut out, file.current_player);
    for record in &file.players {
        check_line(&record.name, "player name")?;
        line(&mut out, &record.name);
        line(&mut out, format_args!("{} {}", record.health, record.max_health));
        line(
            &mut out,
            format_args!("{} {} {}", record.mana, record.max_mana, record.mana_regeneration),
        );
        line(&mut out, record.hand.len());
        for card in &record.hand {
            encode_card(&mut out, card)?;
        }
        for slot in &record.slots {
            match slot {
                Some(card) => encode_card(&mut out, card)?,
                None => line(&mut out, EMPTY_SLOT),
            }
        }
    }
    Ok(out)
}

fn line(out: &mut String, value: impl std::fmt::Display) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "{value}");
}

fn check_line(text: &str, what: &str) -> PersistResult<()> {
    if text.contains(['\n', '\r']) {
        return Err(PersistError::Unencodable(format!("{what} {text:?} contains a line break")));
    }
    Ok(())
}

fn encode_card(out: &mut String, card: &Card) -> PersistResult<()> {
    check_line(&card.name, "card name")?;
    check_line(&card.description, "card description")?;
    line(out, card.kind().code());
    line(out, &card.name);
    line(out, &card.description);
    line(out, card.mana_cost);
    match &card.body {
        CardBody::Creature(c) => line(
            out,
            format_args!("{} {} {} {}", c.attack, c.health, c.max_health, u8::from(c.can_attack)),
        ),
        CardBody::Spell(s) => line(out, s.effect_value),
        CardBody::Building(b) => line(out, format_args!("{} {}", b.durability, b.boost)),
    }
    Ok(())
}

/// Parse a save file. The decks of the result are empty.
pub fn decode(text: &str, config: &BoardConfig) -> PersistResult<SaveFile> {
    let mut reader = LineReader::new(text);
    let current_player = reader.count("current player index")?;

    let mut players = Vec::with_capacity(PlayerId::all().count());
    for _ in PlayerId::all() {
        let name = reader.next("player name")?.to_string();
        let [health, max_health] = reader.numbers("health")?;
        let [mana, max_mana, mana_regeneration] = reader.numbers("mana")?;

        let hand_count = reader.count("hand count")?;
        if hand_count > config.hand_capacity {
            return Err(reader.error(format!(
                "hand count {hand_count} exceeds capacity {}",
                config.hand_capacity
            )));
        }
        let hand = (0..hand_count)
            .map(|_| {
                let code = reader.next("card type")?;
                decode_card(&mut reader, code)
            })
            .collect::<PersistResult<Vec<_>>>()?;

        let slots = (0..config.board_width)
            .map(|_| match reader.next("slot")? {
                EMPTY_SLOT => Ok(None),
                code => decode_card(&mut reader, code).map(Some),
            })
            .collect::<PersistResult<Vec<_>>>()?;

        players.push(PlayerRecord {
            name,
            health,
            max_health,
            mana,
            max_mana,
            mana_regeneration,
            hand,
            slots,
            deck: Vec::new(),
        });
    }

    Ok(SaveFile {
        current_player,
        players,
    })
}

fn decode_card(reader: &mut LineReader<'_>, code_line: &str) -> PersistResult<Card> {
    let code: i64 = code_line
        .trim()
        .parse()
        .map_err(|_| reader.error(format!("expected a card type code, found {code_line:?}")))?;
    let kind = CardKind::from_code(code).ok_or(PersistError::UnknownCardType(code))?;
    let name = reader.next("card name")?.to_string();
    let description = reader.next("card description")?.to_string();
    let [mana_cost] = reader.numbers("mana cost")?;

    let body = match kind {
        CardKind::Creature => {
            let [attack, health, max_health, can_attack] = reader.numbers("creature stats")?;
            CardBody::Creature(Creature {
                attack,
                health,
                max_health,
                can_attack: can_attack == 1,
            })
        }
        CardKind::Spell => {
            let [effect_value] = reader.numbers("spell effect")?;
            CardBody::Spell(Spell { effect_value })
        }
        CardKind::Building => {
            let [durability, boost] = reader.numbers("building stats")?;
            CardBody::Building(Building { durability, boost })
        }
    };

    Ok(Card {
        name,
        description,
        mana_cost,
        body,
    })
}

/// Sequential line reader that remembers the line number for errors.
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> PersistError {
        PersistError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn next(&mut self, what: &str) -> PersistResult<&'a str> {
        self.line += 1;
        match self.lines.next() {
            Some(text) => Ok(text.strip_suffix('\r').unwrap_or(text)),
            None => Err(self.error(format!("expected {what}, found end of file"))),
        }
    }

    /// A line of exactly `N` whitespace-separated integers.
    fn numbers<const N: usize>(&mut self, what: &str) -> PersistResult<[i32; N]> {
        let text = self.next(what)?;
        let values = text
            .split_whitespace()
            .map(str::parse::<i32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| self.error(format!("{what}: expected integers, found {text:?}")))?;
        values
            .try_into()
            .map_err(|_| self.error(format!("{what}: expected {N} values, found {text:?}")))
    }

    /// A line holding one non-negative integer.
    fn count(&mut self, what: &str) -> PersistResult<usize> {
        let text = self.next(what)?;
        text.trim()
            .parse()
            .map_err(|_| self.error(format!("{what}: expected a non-negative integer, found {text:?}")))
    }
}

/// Write `state` to `path` plus `<path>.deck0` and `<path>.deck1`.
///
/// Everything is encoded before the first file is written, so an
/// unencodable card leaves no partial save behind. The three files are
/// staged as `*.tmp` and renamed into place, deck files first, so a failed
/// write leaves the previous save intact. Only a failure between renames
/// can still mix old and new files.
pub fn save(path: &Path, state: &GameState) -> PersistResult<()> {
    let file = SaveFile::from_state(state);
    let main = encode(&file)?;
    let mut files = PlayerId::all()
        .zip(&file.players)
        .map(|(player, record)| {
            deck_file::encode(&record.deck).map(|text| (deck_file::path_for(path, player), text))
        })
        .collect::<PersistResult<Vec<_>>>()?;
    files.push((path.to_path_buf(), main));

    let mut staged = Vec::with_capacity(files.len());
    for (target, text) in &files {
        let temp = staging_path(target);
        if let Err(err) = fs::write(&temp, text) {
            let _ = fs::remove_file(&temp);
            for (written, _) in &staged {
                let _ = fs::remove_file(written);
            }
            return Err(err.into());
        }
        staged.push((temp, target));
    }
    for (temp, target) in &staged {
        fs::rename(temp, target)?;
    }
    Ok(())
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read and validate a game written by [`save`].
pub fn load(path: &Path, config: &BoardConfig) -> PersistResult<GameState> {
    let text = fs::read_to_string(path)?;
    let mut file = decode(&text, config)?;
    for (player, record) in PlayerId::all().zip(file.players.iter_mut()) {
        let deck_path = deck_file::path_for(path, player);
        record.deck = deck_file::decode(&fs::read_to_string(&deck_path)?)?;
        debug!("read {} deck cards from {}", record.deck.len(), deck_path.display());
    }
    file.into_state(config)
}
