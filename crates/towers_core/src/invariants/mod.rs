//! Board and session invariants.
//!
//! Each invariant is a zero-sized type naming one property of the puzzle
//! state. Commits assert the occupancy invariants in debug builds; tests
//! check the rest directly.

/// A property of `S` that no sequence of legal operations may break.
pub trait Invariant<S> {
    /// Whether the property holds for `state`.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// A failed invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Statement of the property that failed.
    pub description: String,
}

impl InvariantViolation {
    /// Records a failed check.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked in one pass. Tuples of invariants implement it.
pub trait InvariantSet<S> {
    /// Runs every check and reports all failures, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        collect(violations)
    }
}

pub mod contiguous_stacks;
pub mod resting_poses;
pub mod size_order;
pub mod unique_discs;

pub use contiguous_stacks::ContiguousStacksInvariant;
pub use resting_poses::RestingPosesInvariant;
pub use size_order::SizeOrderInvariant;
pub use unique_discs::UniqueDiscsInvariant;

/// Occupancy invariants that every board must satisfy after every commit.
pub type BoardInvariants = (ContiguousStacksInvariant, UniqueDiscsInvariant);

/// Invariants of a board that has only ever seen solver-produced moves.
pub type SolvedPathInvariants = (
    ContiguousStacksInvariant,
    UniqueDiscsInvariant,
    SizeOrderInvariant,
);
