use crate::bottom_left::BottomLeftPacker;
use crate::guillotine::GuillotinePacker;
use crate::maxrects::MaxRectsPacker;
use crate::options::{Algorithm, Heuristic, Options};
use crate::packer::Packer;

/// The packing strategy a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BottomLeft,
    Guillotine,
    MaxRects(Heuristic),
}

/// Maps the requested algorithm to a strategy.
///
/// `MAXRECTS` on its own runs guillotine; MaxRects proper is used only when
/// a heuristic is named or `MAXRECTS_BEST` is requested. `guillotineOnly`
/// turns any MaxRects request into guillotine, since MaxRects layouts are
/// not guaranteed to be guillotine-cuttable.
pub fn select_strategy(options: &Options) -> Strategy {
    match options.algorithm {
        Algorithm::BottomLeft => Strategy::BottomLeft,
        Algorithm::Guillotine => Strategy::Guillotine,
        Algorithm::MaxRects | Algorithm::MaxRectsBest if options.guillotine_only => {
            Strategy::Guillotine
        }
        Algorithm::MaxRects => match options.heuristic {
            Some(heuristic) => Strategy::MaxRects(heuristic),
            None => {
                tracing::debug!("MAXRECTS without a heuristic, using guillotine");
                Strategy::Guillotine
            }
        },
        Algorithm::MaxRectsBest => {
            Strategy::MaxRects(options.heuristic.unwrap_or(Heuristic::Best))
        }
    }
}

/// One packer per pass the strategy needs; only `BEST` yields several.
pub fn packers(strategy: Strategy, kerf: u32) -> Vec<Box<dyn Packer>> {
    match strategy {
        Strategy::BottomLeft => vec![Box::new(BottomLeftPacker::new(kerf))],
        Strategy::Guillotine => vec![Box::new(GuillotinePacker::new(kerf))],
        Strategy::MaxRects(heuristic) => heuristic
            .passes()
            .iter()
            .map(|&fit| Box::new(MaxRectsPacker::new(kerf, fit)) as Box<dyn Packer>)
            .collect(),
    }
}
