//! Per-player bookkeeping

use serde::{Deserialize, Serialize};

use crate::core::error::{IllegalAction, Result};
use crate::core::types::{PlayerId, SquadId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    ap_remaining: u32,
    squads_remaining: usize,
    king: Option<SquadId>,
    king_lost: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ap_remaining: 0,
            squads_remaining: 0,
            king: None,
            king_lost: false,
        }
    }

    pub fn ap_remaining(&self) -> u32 {
        self.ap_remaining
    }

    pub fn squads_remaining(&self) -> usize {
        self.squads_remaining
    }

    pub fn king(&self) -> Option<SquadId> {
        self.king
    }

    pub fn reset_ap(&mut self, allowance: u32) {
        self.ap_remaining = allowance;
    }

    /// Fail without spending anything when `cost` exceeds what is left
    pub fn check_ap(&self, cost: u32) -> Result<()> {
        if cost > self.ap_remaining {
            return Err(IllegalAction::NotEnoughAp {
                required: cost,
                remaining: self.ap_remaining,
            }
            .into());
        }
        Ok(())
    }

    pub fn spend_ap(&mut self, cost: u32) -> Result<()> {
        self.check_ap(cost)?;
        self.ap_remaining -= cost;
        Ok(())
    }

    pub fn forfeit_ap(&mut self) {
        self.ap_remaining = 0;
    }

    pub fn add_squad(&mut self, squad: SquadId, is_king: bool) {
        self.squads_remaining += 1;
        if is_king {
            self.king = Some(squad);
        }
    }

    pub fn lose_squad(&mut self, squad: SquadId) {
        self.squads_remaining = self.squads_remaining.saturating_sub(1);
        if self.king == Some(squad) {
            self.king_lost = true;
        }
    }

    pub fn king_lost(&self) -> bool {
        self.king_lost
    }

    /// Out of the match: king gone or down to the minimum squad count
    pub fn is_defeated(&self, min_squads_remaining: usize) -> bool {
        self.king_lost || self.squads_remaining <= min_squads_remaining
    }
}
