//! Lane choice for units
//!
//! Every lane is scored for the incoming unit and the best one wins; ties
//! go to the lower lane index. Scores are relative, only their order
//! matters.

use crate::advisor::{LaneAnalysis, LanePlacement, LaneState};
use crate::core::{Card, GamePhase, Keyword};

const EMPTY: f64 = 10.0;
const CONTEST_WIN: f64 = 20.0;
const CONTEST_TIE: f64 = 15.0;
const CLOSE_TRADE: f64 = 5.0;
const TURN_THE_TIDE: f64 = 12.0;
const REINFORCE: f64 = 8.0;
const OVERCOMMIT: f64 = 4.0;
const KEYWORD_BONUS: f64 = 3.0;

/// Pick a lane for `unit` given the current (possibly projected) lanes
///
/// Always returns a placement when any lane exists; a lane that scores
/// nothing still gets the unit, with a reason saying so.
pub fn choose_lane(unit: &Card, lanes: &[LaneAnalysis], phase: GamePhase) -> Option<LanePlacement> {
    let best = lanes
        .iter()
        .filter_map(|lane| score_lane(unit, lane, phase))
        .fold(None::<LanePlacement>, |best, candidate| match best {
            Some(b) if b.score >= candidate.score => Some(b),
            _ => Some(candidate),
        });

    best.or_else(|| fallback(unit, lanes))
}

fn score_lane(unit: &Card, lane: &LaneAnalysis, phase: GamePhase) -> Option<LanePlacement> {
    let might = unit.might_or_zero();
    let op = lane.op_might;
    let guard = unit.has_keyword(&Keyword::Guard);
    let assault = unit.has_keyword(&Keyword::Assault);

    let (score, reason) = match lane.state {
        LaneState::Empty => {
            let early = if phase.is_early() {
                " (high priority early game)"
            } else {
                ""
            };
            let (bonus, note) = if guard {
                (0.0, " Guard unit can protect this battlefield.")
            } else if assault {
                (KEYWORD_BONUS, " Assault unit can push damage from here.")
            } else {
                (0.0, "")
            };
            (
                EMPTY + bonus,
                format!("Empty battlefield - establish board presence{early}.{note}"),
            )
        }
        LaneState::Contested if might >= op => {
            let (base, verdict) = if might > op {
                (CONTEST_WIN, "can win trade")
            } else {
                (CONTEST_TIE, "can trade evenly")
            };
            let (bonus, note) = if guard {
                (KEYWORD_BONUS, " Guard unit can protect and contest this battlefield.")
            } else if assault && might > op {
                (0.0, " Assault unit can win trade and push advantage.")
            } else {
                (0.0, "")
            };
            (
                base + bonus,
                format!("Contested battlefield - {verdict} ({might} vs {op} might).{note}"),
            )
        }
        LaneState::Contested if might >= op - 1 && !phase.is_early() => (
            CLOSE_TRADE,
            format!("Contested battlefield - close trade ({might} vs {op} might), may need support"),
        ),
        LaneState::Losing if might >= op => (
            TURN_THE_TIDE,
            format!("Losing battlefield - can turn the tide ({might} vs {op} might)"),
        ),
        LaneState::Neutral => (
            REINFORCE,
            format!(
                "Even battlefield - reinforce to break the tie ({} vs {op} might)",
                lane.my_might + might
            ),
        ),
        LaneState::Winning if might >= 4 && lane.advantage >= 2 => (
            OVERCOMMIT,
            format!(
                "Winning battlefield - overcommitting with strong unit ({might} might) to secure advantage"
            ),
        ),
        _ => return None,
    };

    Some(LanePlacement {
        lane: lane.index,
        score,
        reason,
    })
}

/// No lane scored: take the one where we stand best
fn fallback(unit: &Card, lanes: &[LaneAnalysis]) -> Option<LanePlacement> {
    let lane = lanes
        .iter()
        .fold(None::<&LaneAnalysis>, |best, lane| match best {
            Some(b) if b.advantage >= lane.advantage => Some(b),
            _ => Some(lane),
        })?;
    Some(LanePlacement {
        lane: lane.index,
        score: 0.0,
        reason: format!(
            "No optimal battlefield placement available for {} - defaulting to battlefield {}",
            unit.name,
            lane.index + 1
        ),
    })
}
