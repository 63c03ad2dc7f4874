/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::collections::HashMap;

use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::traits::entities::*;
use crate::types::{ParseError, Result};

/// Parse the entity lump: a list of `{ "key" "value" ... }` blocks.
pub fn from_data(data: &[u8]) -> Result<Box<[Entity]>> {
    let text = String::from_utf8_lossy(data);
    let mut chars = text.chars();

    let mut entities = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;
    let mut pending_key: Option<String> = None;

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if current.is_some() {
                    return Err(ParseError::Invalid("nested entity"));
                }
                current = Some(HashMap::new());
            }
            '}' => {
                let attributes = current
                    .take()
                    .ok_or(ParseError::Invalid("unmatched entity close"))?;
                if pending_key.is_some() {
                    return Err(ParseError::Invalid("entity key without value"));
                }
                entities.push(Entity { attributes });
            }
            '"' => {
                let attributes = current
                    .as_mut()
                    .ok_or(ParseError::Invalid("string outside entity"))?;
                let s: String = chars.by_ref().take_while(|&c| c != '"').collect();

                match pending_key.take() {
                    Some(key) => {
                        attributes.insert(key, s);
                    }
                    None => pending_key = Some(s),
                }
            }
            _ => {}
        }
    }

    if current.is_some() {
        return Err(ParseError::Invalid("unterminated entity"));
    }

    Ok(entities.into_boxed_slice())
}

impl<T: CoordSystem> HasEntities for Q3BspFile<T> {
    type EntitiesIter<'a> = std::slice::Iter<'a, Entity>
    where
        T: 'a;

    fn entities_iter(&self) -> Self::EntitiesIter<'_> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_parse_pairs() {
        let lump = b"{\n\"classname\" \"worldspawn\"\n\"message\" \"The Longest Yard\"\n}\n{\n\"classname\" \"info_player_deathmatch\"\n\"origin\" \"-64 128 24\"\n}\n\0";
        let entities = from_data(lump).unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].get("classname"), Some("worldspawn"));
        assert_eq!(entities[0].get("message"), Some("The Longest Yard"));
        assert_eq!(entities[1].get("origin"), Some("-64 128 24"));
        assert_eq!(entities[1].get("angle"), None);
    }

    #[test]
    fn entities_unbalanced() {
        assert!(from_data(b"{ \"a\" \"b\" ").is_err());
        assert!(from_data(b"\"a\" \"b\" }").is_err());
        assert!(from_data(b"{ \"a\" }").is_err());
    }
}
