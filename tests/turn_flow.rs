//! Match flow integration tests
//!
//! Whole matches on a 5x5 board driven through player intents, with the
//! headless presenter answering every presentation request.

use squad_tactics::board::{Orientation, TilePos};
use squad_tactics::core::{GameConfig, IllegalAction, PlayerId, Result};
use squad_tactics::dice::{DiceFace, ScriptedDice};
use squad_tactics::game::{GameEventKind, GamePhase, PlayerIntent, TurnController};
use squad_tactics::presentation::{HeadlessPresenter, SoundId};
use squad_tactics::squad::UnitClass;

use DiceFace::{Arrow, Axe, Panic};

const DT: f32 = 0.1;
const MAX_TICKS: u64 = 5_000;

/// Two deployment rows per side with one neutral row between them
fn small_config(army: Vec<UnitClass>) -> GameConfig {
    GameConfig {
        board_width: 5,
        board_height: 5,
        deployment_rows: 2,
        army,
        seed: Some(1),
        ..GameConfig::default()
    }
}

struct Match {
    controller: TurnController,
    presenter: HeadlessPresenter,
}

impl Match {
    fn new(config: GameConfig, dice: Vec<DiceFace>) -> Self {
        let controller = TurnController::with_dice(
            config,
            Box::new(ScriptedDice::new(dice)),
        ).unwrap();
        let mut m = Self {
            controller,
            presenter: HeadlessPresenter::new(),
        };
        m.settle();
        m
    }

    fn settle(&mut self) {
        self.presenter
            .run_until_settled(&mut self.controller, DT, MAX_TICKS)
            .unwrap();
    }

    fn intent(&mut self, intent: PlayerIntent) -> Result<()> {
        let result = self.controller.handle_intent(intent);
        self.settle();
        result
    }

    fn click(&mut self, row: usize, col: usize) -> Result<()> {
        self.intent(PlayerIntent::TileClicked(TilePos::new(row, col)))
    }

    fn rejection(&mut self, intent: PlayerIntent) -> IllegalAction {
        let err = self.intent(intent).unwrap_err();
        err.as_illegal().cloned().unwrap()
    }

    /// Deploy King, then the rest, for both players and roll for player one to start
    ///
    /// Player one: king (0, 2), then (1, 2), (1, 3).
    /// Player two: king (4, 2), then (3, 2), (3, 3).
    fn deploy(&mut self) {
        for (row, col) in [(0, 2), (1, 2), (1, 3)] {
            self.click(row, col).unwrap();
        }
        self.intent(PlayerIntent::EndPlacementRequested).unwrap();
        for (row, col) in [(4, 2), (3, 2), (3, 3)] {
            self.click(row, col).unwrap();
        }
        self.intent(PlayerIntent::EndPlacementRequested).unwrap();
        self.intent(PlayerIntent::DiceRollRequested).unwrap();
    }

    fn ap(&self) -> u32 {
        self.controller.ap_remaining(self.controller.active_player())
    }

    fn count_events(&self, pred: impl Fn(&GameEventKind) -> bool) -> usize {
        self.controller.events().iter().filter(|e| pred(&e.kind)).count()
    }
}

fn standard_army() -> Vec<UnitClass> {
    vec![UnitClass::King, UnitClass::Infantry, UnitClass::Infantry]
}

#[test]
fn test_deployment_then_turn_order() {
    let mut m = Match::new(small_config(standard_army()), vec![Axe, Arrow]);
    m.deploy();

    assert_eq!(m.controller.phase(), GamePhase::Active);
    assert_eq!(m.controller.active_player(), PlayerId::ONE);
    assert_eq!(m.ap(), 3);
    assert_eq!(m.controller.roster().len(), 6);
    assert_eq!(
        m.count_events(|k| *k == GameEventKind::TurnOrderDecided { first: PlayerId::ONE }),
        1
    );
    let p1_infantry = m.controller.squad_at(TilePos::new(1, 2)).unwrap();
    assert_eq!(p1_infantry.orientation(), Orientation::South);
    let p2_infantry = m.controller.squad_at(TilePos::new(3, 2)).unwrap();
    assert_eq!(p2_infantry.orientation(), Orientation::North);
}

#[test]
fn test_tied_turn_order_rolls_again() {
    let mut m = Match::new(small_config(standard_army()), vec![Axe, Axe, Panic, Arrow]);
    for (row, col) in [(0, 2), (1, 2), (1, 3)] {
        m.click(row, col).unwrap();
    }
    m.intent(PlayerIntent::EndPlacementRequested).unwrap();
    for (row, col) in [(4, 2), (3, 2), (3, 3)] {
        m.click(row, col).unwrap();
    }
    m.intent(PlayerIntent::EndPlacementRequested).unwrap();

    m.intent(PlayerIntent::DiceRollRequested).unwrap();
    assert_eq!(m.controller.phase(), GamePhase::TurnOrderRoll);
    assert_eq!(m.count_events(|k| *k == GameEventKind::TurnOrderTied), 1);

    m.intent(PlayerIntent::DiceRollRequested).unwrap();
    assert_eq!(m.controller.phase(), GamePhase::Active);
    assert_eq!(m.controller.active_player(), PlayerId::TWO);
}

#[test]
fn test_placement_rejections() {
    let mut m = Match::new(small_config(standard_army()), vec![]);
    m.click(0, 0).unwrap();

    assert_eq!(
        m.rejection(PlayerIntent::TileClicked(TilePos::new(0, 0))),
        IllegalAction::TileOccupied(TilePos::new(0, 0))
    );
    assert_eq!(
        m.rejection(PlayerIntent::TileClicked(TilePos::new(2, 0))),
        IllegalAction::OutsideDeploymentZone(TilePos::new(2, 0))
    );
    assert_eq!(
        m.rejection(PlayerIntent::EndTurnRequested),
        IllegalAction::WrongPhase
    );

    m.click(0, 1).unwrap();
    m.click(0, 3).unwrap();
    assert_eq!(
        m.rejection(PlayerIntent::TileClicked(TilePos::new(1, 1))),
        IllegalAction::RosterExhausted
    );
    assert_eq!(m.presenter.sound_count(SoundId::Error), 4);
    assert_eq!(m.controller.placement_remaining(PlayerId::ONE), 0);
}

#[test]
fn test_move_then_attack_spends_ap() {
    let mut m = Match::new(
        small_config(standard_army()),
        vec![Axe, Arrow, Axe, Arrow, Arrow],
    );
    m.deploy();

    m.click(1, 2).unwrap();
    let infantry = m.controller.squad_at(TilePos::new(1, 2)).unwrap().id();
    assert_eq!(m.controller.selected(), Some(infantry));
    m.click(2, 2).unwrap();
    assert_eq!(m.ap(), 2);
    assert!(m.controller.squad_at(TilePos::new(2, 2)).is_some());
    assert!(m.controller.squad_at(TilePos::new(1, 2)).is_none());

    m.click(2, 2).unwrap();
    m.click(3, 2).unwrap();

    assert_eq!(m.controller.phase(), GamePhase::Active);
    assert_eq!(m.controller.active_player(), PlayerId::ONE);
    assert_eq!(m.ap(), 1);
    let defender = m.controller.squad_at(TilePos::new(3, 2)).unwrap();
    assert_eq!(defender.units_remaining(), 2);
    let combat = m.controller.last_combat().unwrap();
    assert_eq!(combat.damage_dealt, 1);
    assert!(!combat.bonus_earned);
}

#[test]
fn test_not_enough_ap_changes_nothing() {
    let mut config = small_config(vec![UnitClass::King, UnitClass::Knight, UnitClass::Infantry]);
    config.ap_per_turn = 1;
    let mut m = Match::new(config, vec![Axe, Arrow]);
    m.deploy();

    // Knight at (1, 2) moves for 2 AP
    m.click(1, 2).unwrap();
    let err = m.rejection(PlayerIntent::TileClicked(TilePos::new(2, 2)));
    assert_eq!(
        err,
        IllegalAction::NotEnoughAp {
            required: 2,
            remaining: 1
        }
    );
    assert_eq!(m.ap(), 1);
    assert!(m.controller.squad_at(TilePos::new(1, 2)).is_some());
    assert!(m.controller.squad_at(TilePos::new(2, 2)).is_none());
    assert_eq!(m.controller.active_player(), PlayerId::ONE);
}

#[test]
fn test_spending_last_ap_ends_the_turn() {
    let mut config = small_config(standard_army());
    config.ap_per_turn = 1;
    let mut m = Match::new(config, vec![Axe, Arrow]);
    m.deploy();

    m.click(1, 3).unwrap();
    m.click(2, 3).unwrap();

    assert_eq!(m.controller.active_player(), PlayerId::TWO);
    assert_eq!(m.ap(), 1);
    assert_eq!(m.controller.ap_remaining(PlayerId::ONE), 0);
    assert_eq!(
        m.count_events(|k| *k == GameEventKind::TurnEnded { player: PlayerId::ONE }),
        1
    );
}

#[test]
fn test_rotation_needs_selection() {
    let mut m = Match::new(small_config(standard_army()), vec![Axe, Arrow]);
    m.deploy();
    let id = m.controller.squad_at(TilePos::new(1, 3)).unwrap().id();

    assert_eq!(
        m.rejection(PlayerIntent::RotationArrowClicked(id, Orientation::East)),
        IllegalAction::NotHighlighted(TilePos::new(1, 3))
    );

    m.click(1, 3).unwrap();
    assert_eq!(
        m.rejection(PlayerIntent::RotationArrowClicked(id, Orientation::South)),
        IllegalAction::AlreadyFacing
    );
    m.intent(PlayerIntent::RotationArrowClicked(id, Orientation::East))
        .unwrap();

    assert_eq!(m.controller.squad(id).unwrap().orientation(), Orientation::East);
    assert_eq!(m.ap(), 2);
    assert_eq!(m.controller.selected(), None);

    let enemy = m.controller.squad_at(TilePos::new(3, 3)).unwrap().id();
    assert!(matches!(
        m.rejection(PlayerIntent::RotationArrowClicked(enemy, Orientation::West)),
        IllegalAction::NotYourSquad(..)
    ));
}

#[test]
fn test_intents_rejected_while_attack_runs() {
    let mut m = Match::new(
        small_config(standard_army()),
        vec![Axe, Arrow, Axe, Arrow, Arrow],
    );
    m.deploy();
    m.click(1, 2).unwrap();
    m.click(2, 2).unwrap();
    m.click(2, 2).unwrap();

    m.controller
        .handle_intent(PlayerIntent::TileClicked(TilePos::new(3, 2)))
        .unwrap();
    assert_eq!(m.controller.phase(), GamePhase::Attacking);
    let err = m
        .controller
        .handle_intent(PlayerIntent::EndTurnRequested)
        .unwrap_err();
    assert_eq!(err.as_illegal(), Some(&IllegalAction::Busy));

    let attacker = m.controller.squad_at(TilePos::new(2, 2)).unwrap().id();
    let king = m.controller.squad_at(TilePos::new(0, 2)).unwrap().id();
    let err = m
        .controller
        .handle_intent(PlayerIntent::SquadClicked(king))
        .unwrap_err();
    assert_eq!(err.as_illegal(), Some(&IllegalAction::Busy));
    assert_eq!(m.controller.selected(), Some(attacker));
    assert!(!m.controller.board().is_valid_move_target(TilePos::new(1, 2)));

    m.settle();
    assert_eq!(m.controller.phase(), GamePhase::Active);
}

#[test]
fn test_attrition_ends_the_match() {
    let mut m = Match::new(
        small_config(standard_army()),
        vec![Axe, Arrow, Axe, Axe, Axe, Axe, Axe, Axe],
    );
    m.deploy();

    // Player one marches the left infantry forward and wipes out the squad ahead
    m.click(1, 2).unwrap();
    m.click(2, 2).unwrap();
    m.click(2, 2).unwrap();
    m.click(3, 2).unwrap();
    assert!(m.controller.squad_at(TilePos::new(3, 2)).is_none());
    assert_eq!(m.controller.player(PlayerId::TWO).squads_remaining(), 2);

    // Last AP moves the right infantry up; the turn passes
    m.click(1, 3).unwrap();
    m.click(2, 3).unwrap();
    assert_eq!(m.controller.active_player(), PlayerId::TWO);
    m.intent(PlayerIntent::EndTurnRequested).unwrap();

    m.click(2, 3).unwrap();
    m.click(3, 3).unwrap();

    assert_eq!(
        m.controller.phase(),
        GamePhase::GameOver {
            winner: PlayerId::ONE
        }
    );
    assert_eq!(m.controller.winner(), Some(PlayerId::ONE));
    assert_eq!(m.controller.spectators(PlayerId::ONE).cheers(), 2);
    assert_eq!(m.controller.spectators(PlayerId::TWO).cheers(), 0);
    assert_eq!(m.presenter.sound_count(SoundId::Victory), 1);
    assert_eq!(
        m.rejection(PlayerIntent::EndTurnRequested),
        IllegalAction::WrongPhase
    );
}

#[test]
fn test_quick_start_round() {
    let mut m = Match::new(GameConfig::default().with_seed(3), vec![]);
    m.controller.quick_start().unwrap();
    m.settle();

    assert_eq!(m.controller.active_player(), PlayerId::ONE);
    m.intent(PlayerIntent::EndTurnRequested).unwrap();
    assert_eq!(m.controller.active_player(), PlayerId::TWO);
    m.intent(PlayerIntent::EndTurnRequested).unwrap();
    assert_eq!(m.controller.active_player(), PlayerId::ONE);
    assert_eq!(m.ap(), 3);

    let json = serde_json::to_string(m.controller.events()).unwrap();
    assert!(json.contains("TurnEnded"));
}

#[test]
fn test_quick_start_on_a_single_deployment_row() {
    let config = GameConfig {
        deployment_rows: 1,
        ..GameConfig::default().with_seed(5)
    };
    let mut m = Match::new(config, vec![]);
    m.controller.quick_start().unwrap();
    m.settle();

    assert_eq!(m.controller.phase(), GamePhase::Active);
    for side in [PlayerId::ONE, PlayerId::TWO] {
        assert_eq!(m.controller.player(side).squads_remaining(), 8);
    }
    let king = m.controller.squad_at(TilePos::new(0, 4)).unwrap();
    assert_eq!(king.class(), UnitClass::King);
}

#[test]
fn test_quick_start_deploys_a_large_army() {
    let mut army = vec![UnitClass::King];
    army.extend(std::iter::repeat(UnitClass::Infantry).take(19));
    let config = GameConfig {
        deployment_rows: 3,
        army,
        ..GameConfig::default().with_seed(5)
    };
    let mut m = Match::new(config, vec![]);
    m.controller.quick_start().unwrap();
    m.settle();

    for side in [PlayerId::ONE, PlayerId::TWO] {
        assert_eq!(m.controller.player(side).squads_remaining(), 20);
    }
    assert!(m.controller.squad_at(TilePos::new(0, 0)).is_none());
    let king = m.controller.squad_at(TilePos::new(0, 4)).unwrap();
    assert_eq!(king.class(), UnitClass::King);
}

#[test]
fn test_default_config_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/game.toml");
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.army.len(), 8);
    assert_eq!(config.ap_per_turn, 3);
}
