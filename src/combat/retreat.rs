//! Chained panic retreat
//!
//! A retreat is a stack of frames. The top frame is the squad currently
//! trying to step; a friendly squad in the way gets its own one-tile frame
//! pushed on top, and the blocked squad resumes once that frame is done.
//! Every step waits for the squad's animations, then for a settling delay.

use crate::anim::Animatable;
use crate::board::{BoardGrid, Orientation};
use crate::core::error::{GameError, Result};
use crate::core::types::SquadId;
use crate::game::events::{EventLog, GameEventKind};
use crate::squad::SquadRoster;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameState {
    Ready,
    /// Stepped; `waited` only ages once the squad has stopped animating
    Settling { waited: f32 },
    /// Pushed the occupant of the next tile and waits for it to clear
    WaitingForVacate(SquadId),
}

#[derive(Debug, Clone)]
struct RetreatFrame {
    squad: SquadId,
    direction: Orientation,
    steps_left: u32,
    state: FrameState,
}

#[derive(Debug, Clone)]
pub struct PanicRetreat {
    frames: Vec<RetreatFrame>,
    settle_delay: f32,
}

impl PanicRetreat {
    pub fn new(squad: SquadId, direction: Orientation, distance: u32, settle_delay: f32) -> Self {
        Self {
            frames: vec![RetreatFrame {
                squad,
                direction,
                steps_left: distance,
                state: FrameState::Ready,
            }],
            settle_delay,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }

    /// Squads currently part of the chain
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Advance the top frame by one state
    pub fn step(
        &mut self,
        dt: f32,
        roster: &mut SquadRoster,
        board: &mut BoardGrid,
        log: &mut EventLog,
    ) -> Result<()> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };

        let Some(squad) = roster.get(frame.squad).filter(|s| !s.is_eliminated()) else {
            self.frames.pop();
            return Ok(());
        };

        match frame.state {
            FrameState::Settling { waited } => {
                if squad.is_animating() {
                    return Ok(());
                }
                let waited = waited + dt;
                frame.state = if waited >= self.settle_delay {
                    FrameState::Ready
                } else {
                    FrameState::Settling { waited }
                };
                Ok(())
            }
            FrameState::WaitingForVacate(blocker) => {
                tracing::debug!(
                    "squad {:?} resumes after {:?} cleared the way",
                    frame.squad,
                    blocker
                );
                frame.state = FrameState::Ready;
                Ok(())
            }
            FrameState::Ready => {
                if frame.steps_left == 0 {
                    self.frames.pop();
                    return Ok(());
                }

                let id = frame.squad;
                let direction = frame.direction;
                let owner = squad.owner();
                let pos = squad.tile().ok_or_else(|| {
                    GameError::Invariant(format!("retreating squad {:?} has no tile", id))
                })?;

                let Some(next) = board.scan_next_tile(pos, direction) else {
                    self.frames.pop();
                    roster.panic_death(board, id, direction);
                    log.push(
                        GameEventKind::PanicDeath { squad: id },
                        format!("Squad {:?} fled off the board at {}", id, pos),
                    );
                    return Ok(());
                };

                match board.occupant(next) {
                    None => {
                        roster.relocate(board, id, next)?;
                        frame.steps_left -= 1;
                        frame.state = FrameState::Settling { waited: 0.0 };
                        log.push(
                            GameEventKind::Retreated { squad: id, to: next },
                            format!("Squad {:?} falls back to {}", id, next),
                        );
                    }
                    Some(blocker) => {
                        let pushable = roster
                            .get(blocker)
                            .is_some_and(|b| b.owner() == owner && b.can_receive_panic());
                        if pushable {
                            frame.state = FrameState::WaitingForVacate(blocker);
                            self.frames.push(RetreatFrame {
                                squad: blocker,
                                direction,
                                steps_left: 1,
                                state: FrameState::Ready,
                            });
                            log.push(
                                GameEventKind::Panic { squad: blocker, distance: 1 },
                                format!("Squad {:?} is pushed back by {:?}", blocker, id),
                            );
                        } else {
                            self.frames.pop();
                            roster.panic_death(board, id, direction);
                            log.push(
                                GameEventKind::PanicDeath { squad: id },
                                format!("Squad {:?} is cut down fleeing into {}", id, next),
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TilePos;
    use crate::core::config::GameConfig;
    use crate::core::types::{IdAllocator, PlayerId};
    use crate::presentation::PresentationRequest;
    use crate::squad::{SquadEntity, UnitClass};

    struct World {
        roster: SquadRoster,
        board: BoardGrid,
        ids: IdAllocator,
        log: EventLog,
    }

    impl World {
        fn new() -> Self {
            Self {
                roster: SquadRoster::new(),
                board: BoardGrid::build(9, 9),
                ids: IdAllocator::new(),
                log: EventLog::new(),
            }
        }

        fn add(&mut self, owner: PlayerId, class: UnitClass, tile: TilePos) -> SquadId {
            let id = self.ids.squad();
            let squad = SquadEntity::spawn(
                id,
                owner,
                class,
                tile,
                Orientation::North,
                &mut self.ids,
                &GameConfig::default(),
            );
            self.board.place_squad(tile, id).unwrap();
            self.roster.insert(squad);
            id
        }

        /// Step the retreat to completion, acknowledging every animation
        fn run(&mut self, retreat: &mut PanicRetreat) -> usize {
            let mut steps = 0;
            while !retreat.is_finished() {
                let mut out = Vec::new();
                self.roster.advance(0.1, &mut out);
                for request in out {
                    if let PresentationRequest::Animation { entity, .. } = request {
                        self.roster.complete_entity(entity);
                    }
                }
                retreat
                    .step(0.1, &mut self.roster, &mut self.board, &mut self.log)
                    .unwrap();
                assert!(self.board.verify_occupancy(self.roster.placements()).is_ok());
                steps += 1;
                assert!(steps < 500, "retreat never finished");
            }
            steps
        }
    }

    #[test]
    fn test_open_ground_retreat() {
        let mut w = World::new();
        let id = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(4, 4));
        let mut retreat = PanicRetreat::new(id, Orientation::South, 2, 0.2);
        w.run(&mut retreat);
        assert_eq!(w.roster.get(id).unwrap().tile(), Some(TilePos::new(6, 4)));
    }

    #[test]
    fn test_settle_delay_starts_after_a_slow_march() {
        let mut w = World::new();
        let id = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(4, 4));
        let mut retreat = PanicRetreat::new(id, Orientation::South, 2, 0.25);
        let dt = 0.016;
        let mut held = Vec::new();
        let mut elapsed = 0.0;

        // The renderer sits on the first march for a full second
        while elapsed < 1.0 {
            let mut out = Vec::new();
            w.roster.advance(dt, &mut out);
            for request in out {
                if let PresentationRequest::Animation { entity, .. } = request {
                    held.push(entity);
                }
            }
            retreat.step(dt, &mut w.roster, &mut w.board, &mut w.log).unwrap();
            elapsed += dt;
        }
        assert_eq!(w.roster.get(id).unwrap().tile(), Some(TilePos::new(5, 4)));
        for entity in held {
            w.roster.complete_entity(entity);
        }

        let mut settled = 0.0;
        while w.roster.get(id).unwrap().tile() == Some(TilePos::new(5, 4)) {
            let mut out = Vec::new();
            w.roster.advance(dt, &mut out);
            for request in out {
                if let PresentationRequest::Animation { entity, .. } = request {
                    w.roster.complete_entity(entity);
                }
            }
            retreat.step(dt, &mut w.roster, &mut w.board, &mut w.log).unwrap();
            settled += dt;
            assert!(settled < 1.0, "second step never started");
        }
        assert!(settled >= 0.25, "second step after only {settled}s");
        assert_eq!(w.roster.get(id).unwrap().tile(), Some(TilePos::new(6, 4)));
    }

    #[test]
    fn test_edge_is_panic_death() {
        let mut w = World::new();
        let id = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(0, 4));
        let mut retreat = PanicRetreat::new(id, Orientation::North, 1, 0.2);
        w.run(&mut retreat);
        assert!(w.roster.get(id).unwrap().is_eliminated());
        assert!(!w.board.is_occupied(TilePos::new(0, 4)));
        assert_eq!(w.roster.take_eliminations(), vec![id]);
    }

    #[test]
    fn test_enemy_in_the_way_is_panic_death() {
        let mut w = World::new();
        let id = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(4, 4));
        let enemy = w.add(PlayerId::TWO, UnitClass::Infantry, TilePos::new(5, 4));
        let mut retreat = PanicRetreat::new(id, Orientation::South, 1, 0.2);
        w.run(&mut retreat);
        assert!(w.roster.get(id).unwrap().is_eliminated());
        assert_eq!(w.roster.get(enemy).unwrap().tile(), Some(TilePos::new(5, 4)));
    }

    #[test]
    fn test_unpushable_friend_is_panic_death() {
        let mut w = World::new();
        let id = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(4, 4));
        let merc = w.add(PlayerId::ONE, UnitClass::Mercenary, TilePos::new(5, 4));
        let mut retreat = PanicRetreat::new(id, Orientation::South, 1, 0.2);
        w.run(&mut retreat);
        assert!(w.roster.get(id).unwrap().is_eliminated());
        assert!(!w.roster.get(merc).unwrap().is_eliminated());
    }

    #[test]
    fn test_chain_pushes_friends() {
        let mut w = World::new();
        let front = w.add(PlayerId::ONE, UnitClass::Infantry, TilePos::new(2, 4));
        let middle = w.add(PlayerId::ONE, UnitClass::Archer, TilePos::new(3, 4));
        let back = w.add(PlayerId::ONE, UnitClass::Peasant, TilePos::new(4, 4));

        let mut retreat = PanicRetreat::new(front, Orientation::South, 1, 0.2);
        w.run(&mut retreat);

        assert_eq!(w.roster.get(front).unwrap().tile(), Some(TilePos::new(3, 4)));
        assert_eq!(w.roster.get(middle).unwrap().tile(), Some(TilePos::new(4, 4)));
        assert_eq!(w.roster.get(back).unwrap().tile(), Some(TilePos::new(5, 4)));
        assert!(!w.board.is_occupied(TilePos::new(2, 4)));
    }

    #[test]
    fn test_chain_into_edge_kills_last() {
        let mut w = World::new();
        let first = w.add(PlayerId::TWO, UnitClass::Infantry, TilePos::new(2, 0));
        let second = w.add(PlayerId::TWO, UnitClass::Infantry, TilePos::new(1, 0));
        let last = w.add(PlayerId::TWO, UnitClass::Knight, TilePos::new(0, 0));

        let mut retreat = PanicRetreat::new(first, Orientation::North, 1, 0.2);
        w.run(&mut retreat);

        assert!(w.roster.get(last).unwrap().is_eliminated());
        assert_eq!(w.roster.get(second).unwrap().tile(), Some(TilePos::new(0, 0)));
        assert_eq!(w.roster.get(first).unwrap().tile(), Some(TilePos::new(1, 0)));
        assert!(!w.board.is_occupied(TilePos::new(2, 0)));
    }
}
