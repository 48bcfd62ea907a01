//! Round and question collection editing.
//!
//! All operations keep the two structural invariants of the snapshot:
//! the `rounds` sequence is never empty, and every `round_number` equals
//! its round's 1-based position (re-derived after every removal).
//! Questions are unnumbered, so removing one needs no renumbering.

use super::types::{BehavioralQuestion, ExperienceForm, Round, TechnicalQuestion};

/// Which question collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Technical,
    Behavioral,
}

impl ExperienceForm {
    /// Append a fresh round and return its index.
    pub fn add_round(&mut self) -> usize {
        let number = self.rounds.len() as u32 + 1;
        self.rounds.push(Round::numbered(number));
        self.rounds.len() - 1
    }

    /// Remove the round at `index`, renumbering the remainder.
    ///
    /// The minimum-one-round invariant is enforced here: removing the last
    /// remaining round (or passing an out-of-range index) is a no-op that
    /// returns `false`.
    pub fn remove_round(&mut self, index: usize) -> bool {
        if self.rounds.len() <= 1 || index >= self.rounds.len() {
            return false;
        }
        self.rounds.remove(index);
        self.renumber_rounds();
        true
    }

    fn renumber_rounds(&mut self) {
        for (position, round) in self.rounds.iter_mut().enumerate() {
            round.round_number = position as u32 + 1;
        }
    }

    /// Append a default question of the given kind to a round.
    /// Returns the new question's index, or `None` for a bad round index.
    pub fn add_question(&mut self, round: usize, kind: QuestionKind) -> Option<usize> {
        let round = self.rounds.get_mut(round)?;
        match kind {
            QuestionKind::Technical => {
                round.technical_questions.push(TechnicalQuestion::default());
                Some(round.technical_questions.len() - 1)
            }
            QuestionKind::Behavioral => {
                round.behavioral_questions.push(BehavioralQuestion::default());
                Some(round.behavioral_questions.len() - 1)
            }
        }
    }

    /// Remove a question; siblings keep their order.
    pub fn remove_question(&mut self, round: usize, question: usize, kind: QuestionKind) -> bool {
        let Some(round) = self.rounds.get_mut(round) else {
            return false;
        };
        match kind {
            QuestionKind::Technical => {
                if question >= round.technical_questions.len() {
                    return false;
                }
                round.technical_questions.remove(question);
            }
            QuestionKind::Behavioral => {
                if question >= round.behavioral_questions.len() {
                    return false;
                }
                round.behavioral_questions.remove(question);
            }
        }
        true
    }

    /// Update a single technical question in place, leaving siblings
    /// untouched. Returns `false` if either index is out of range.
    pub fn update_technical_question<F>(&mut self, round: usize, question: usize, update: F) -> bool
    where
        F: FnOnce(&mut TechnicalQuestion),
    {
        match self
            .rounds
            .get_mut(round)
            .and_then(|r| r.technical_questions.get_mut(question))
        {
            Some(q) => {
                update(q);
                true
            }
            None => false,
        }
    }

    /// Update a single behavioral question in place.
    pub fn update_behavioral_question<F>(&mut self, round: usize, question: usize, update: F) -> bool
    where
        F: FnOnce(&mut BehavioralQuestion),
    {
        match self
            .rounds
            .get_mut(round)
            .and_then(|r| r.behavioral_questions.get_mut(question))
        {
            Some(q) => {
                update(q);
                true
            }
            None => false,
        }
    }

    /// Update a round's own fields in place.
    pub fn update_round<F>(&mut self, round: usize, update: F) -> bool
    where
        F: FnOnce(&mut Round),
    {
        match self.rounds.get_mut(round) {
            Some(r) => {
                update(r);
                true
            }
            None => false,
        }
    }
}
