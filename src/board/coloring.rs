use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::BoardMove;
use crate::round::Source;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u8,
    pub number: u8,
    pub x: u16,
    pub y: u16,
    pub colored_by: Option<Source>,
}

impl Area {
    const fn new(id: u8, number: u8, x: u16, y: u16) -> Self {
        Area {
            id,
            number,
            x,
            y,
            colored_by: None,
        }
    }

    pub fn color(&self) -> Option<&'static str> {
        self.colored_by.and(palette(self.number))
    }
}

pub fn palette(number: u8) -> Option<&'static str> {
    match number {
        1 => Some("#FF6B6B"),
        2 => Some("#4ECDC4"),
        3 => Some("#FFE66D"),
        4 => Some("#A8E6CF"),
        5 => Some("#FFB6C1"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColoringBoard {
    areas: Vec<Area>,
}

impl Default for ColoringBoard {
    fn default() -> Self {
        ColoringBoard {
            areas: vec![
                Area::new(1, 1, 100, 100),
                Area::new(2, 2, 200, 100),
                Area::new(3, 3, 150, 200),
                Area::new(4, 1, 250, 200),
                Area::new(5, 2, 100, 300),
                Area::new(6, 3, 200, 300),
            ],
        }
    }
}

impl ColoringBoard {
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn apply_player_move(&mut self, area_id: &str) -> Option<BoardMove> {
        let area_id: u8 = area_id.trim().parse().ok()?;
        let area = self
            .areas
            .iter_mut()
            .find(|area| area.id == area_id && area.colored_by.is_none())?;
        area.colored_by = Some(Source::Player);
        Some(BoardMove {
            notation: area_id.to_string(),
            captured: false,
        })
    }

    pub fn opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<BoardMove> {
        let mut uncolored: Vec<&mut Area> = self
            .areas
            .iter_mut()
            .filter(|area| area.colored_by.is_none())
            .collect();
        let area = uncolored.choose_mut(rng)?;
        area.colored_by = Some(Source::Opponent);
        Some(BoardMove {
            notation: area.id.to_string(),
            captured: false,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.areas.iter().all(|area| area.colored_by.is_some())
    }
}
