use std::fmt;

use super::classify::PointClassification;
use super::split::ModelSource;

/// The common flag presets of a combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    /// A minus B.
    Subtract,
    Intersect,
}

/// Which classified fragments survive a combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombineFlags {
    pub a_inside_b: bool,
    pub a_outside_b: bool,
    pub b_inside_a: bool,
    pub b_outside_a: bool,
}

impl From<BooleanOp> for CombineFlags {
    fn from(op: BooleanOp) -> Self {
        let (a_inside_b, a_outside_b, b_inside_a, b_outside_a) = match op {
            BooleanOp::Union => (false, true, false, true),
            BooleanOp::Subtract => (false, true, true, false),
            BooleanOp::Intersect => (true, false, true, false),
        };
        Self {
            a_inside_b,
            a_outside_b,
            b_inside_a,
            b_outside_a,
        }
    }
}

/// How the two copies of a shared fragment face each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedSide {
    /// Both operands fill the same side of the fragment.
    Same,
    /// Each operand fills a different side.
    Opposite,
}

/// Why a fragment was left out of a combine result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReason {
    Inside,
    Outside,
    Duplicate,
    DeadEnd,
}

impl fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inside => "segment is inside the other model",
            Self::Outside => "segment is outside the other model",
            Self::Duplicate => "segment is a duplicate",
            Self::DeadEnd => "dead end",
        })
    }
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    Discard(DeleteReason),
}

fn keep_if(include: bool, otherwise: DeleteReason) -> KeepDecision {
    if include {
        KeepDecision::Keep
    } else {
        KeepDecision::Discard(otherwise)
    }
}

/// Determines whether a fragment should be kept based on its classification
/// relative to the other model and the combine flags.
///
/// | Fragment | vs other model | kept when     |
/// |----------|----------------|---------------|
/// | from A   | INSIDE B       | `a_inside_b`  |
/// | from A   | OUTSIDE B      | `a_outside_b` |
/// | from B   | INSIDE A       | `b_inside_a`  |
/// | from B   | OUTSIDE A      | `b_outside_a` |
///
/// Boundary fragments are treated as shared with both operands on the same
/// side; use [`should_keep_shared`] when the side is known.
#[must_use]
pub fn should_keep_fragment(source: ModelSource, classification: PointClassification, flags: &CombineFlags) -> KeepDecision {
    match (source, classification) {
        (ModelSource::A, PointClassification::Inside) => keep_if(flags.a_inside_b, DeleteReason::Inside),
        (ModelSource::A, PointClassification::Outside) => keep_if(flags.a_outside_b, DeleteReason::Outside),
        (ModelSource::B, PointClassification::Inside) => keep_if(flags.b_inside_a, DeleteReason::Inside),
        (ModelSource::B, PointClassification::Outside) => keep_if(flags.b_outside_a, DeleteReason::Outside),
        (_, PointClassification::OnBoundary) => should_keep_shared(source, SharedSide::Same, flags),
    }
}

/// Decides a fragment that both operands share.
///
/// Only A's copy can survive. It stays when the result region differs on its
/// two sides: the overlap of A and B is in the result when both inside
/// flags agree, and A-only or B-only space follows its outside flag.
#[must_use]
pub fn should_keep_shared(source: ModelSource, side: SharedSide, flags: &CombineFlags) -> KeepDecision {
    match (source, side) {
        (ModelSource::B, _) => KeepDecision::Discard(DeleteReason::Duplicate),
        (ModelSource::A, SharedSide::Same) => {
            keep_if(flags.a_inside_b == flags.b_inside_a, DeleteReason::Duplicate)
        }
        (ModelSource::A, SharedSide::Opposite) => {
            keep_if(flags.a_outside_b != flags.b_outside_a, DeleteReason::Duplicate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(source: ModelSource, class: PointClassification, op: BooleanOp) -> KeepDecision {
        should_keep_fragment(source, class, &op.into())
    }

    #[test]
    fn union_keeps_outside_fragments() {
        assert_eq!(decide(ModelSource::A, PointClassification::Outside, BooleanOp::Union), KeepDecision::Keep);
        assert_eq!(decide(ModelSource::B, PointClassification::Outside, BooleanOp::Union), KeepDecision::Keep);
    }

    #[test]
    fn union_discards_inside_fragments() {
        assert_eq!(
            decide(ModelSource::A, PointClassification::Inside, BooleanOp::Union),
            KeepDecision::Discard(DeleteReason::Inside)
        );
        assert_eq!(
            decide(ModelSource::B, PointClassification::Inside, BooleanOp::Union),
            KeepDecision::Discard(DeleteReason::Inside)
        );
    }

    #[test]
    fn subtract_keeps_a_outside_and_b_inside() {
        assert_eq!(decide(ModelSource::A, PointClassification::Outside, BooleanOp::Subtract), KeepDecision::Keep);
        assert_eq!(decide(ModelSource::B, PointClassification::Inside, BooleanOp::Subtract), KeepDecision::Keep);
        assert_eq!(
            decide(ModelSource::B, PointClassification::Outside, BooleanOp::Subtract),
            KeepDecision::Discard(DeleteReason::Outside)
        );
    }

    #[test]
    fn intersect_keeps_inside_fragments() {
        assert_eq!(decide(ModelSource::A, PointClassification::Inside, BooleanOp::Intersect), KeepDecision::Keep);
        assert_eq!(decide(ModelSource::B, PointClassification::Inside, BooleanOp::Intersect), KeepDecision::Keep);
    }

    #[test]
    fn shared_edges_follow_the_result_region() {
        let dup = KeepDecision::Discard(DeleteReason::Duplicate);
        // Identical shapes.
        assert_eq!(should_keep_shared(ModelSource::A, SharedSide::Same, &BooleanOp::Union.into()), KeepDecision::Keep);
        assert_eq!(should_keep_shared(ModelSource::A, SharedSide::Same, &BooleanOp::Intersect.into()), KeepDecision::Keep);
        assert_eq!(should_keep_shared(ModelSource::A, SharedSide::Same, &BooleanOp::Subtract.into()), dup);
        // Shapes touching along an edge.
        assert_eq!(should_keep_shared(ModelSource::A, SharedSide::Opposite, &BooleanOp::Union.into()), dup);
        assert_eq!(should_keep_shared(ModelSource::A, SharedSide::Opposite, &BooleanOp::Subtract.into()), KeepDecision::Keep);
        assert_eq!(should_keep_shared(ModelSource::B, SharedSide::Same, &BooleanOp::Union.into()), dup);
    }
}
