use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{OptionLabel, QuestionBank};

/// Randomization switches applied whenever a session order is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    pub randomize_questions: bool,
    pub randomize_options: bool,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            randomize_questions: true,
            randomize_options: true,
        }
    }
}

/// Navigation order plus the visible option order of every question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SessionOrder {
    /// Bank indices in navigation order.
    pub questions: Vec<usize>,
    /// Option display order, indexed by bank index.
    pub options: Vec<Vec<OptionLabel>>,
}

impl SessionOrder {
    /// Build a fresh order for `bank`.
    ///
    /// Question order is `0..len`, shuffled uniformly when enabled. Option order is the
    /// canonical label order, shuffled per question when enabled; labels travel with
    /// their text so answers are unaffected.
    pub(crate) fn build<R: Rng + ?Sized>(
        bank: &QuestionBank,
        options: OrderOptions,
        rng: &mut R,
    ) -> Self {
        let mut questions: Vec<usize> = (0..bank.len()).collect();
        if options.randomize_questions {
            questions.as_mut_slice().shuffle(rng);
        }

        let options = bank
            .iter()
            .map(|question| {
                let mut labels = question.options().labels();
                if options.randomize_options {
                    labels.as_mut_slice().shuffle(rng);
                }
                labels
            })
            .collect();

        Self { questions, options }
    }

    pub(crate) fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FIXED: OrderOptions = OrderOptions {
        randomize_questions: false,
        randomize_options: false,
    };

    #[test]
    fn fixed_order_follows_bank() {
        let bank = QuestionBank::sample();
        let order = SessionOrder::build(&bank, FIXED, &mut StdRng::seed_from_u64(1));

        assert_eq!(order.questions, vec![0, 1]);
        assert_eq!(
            order.options[0],
            vec![OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D]
        );
        assert_eq!(
            order.options[1],
            vec![OptionLabel::A, OptionLabel::B, OptionLabel::C]
        );
    }

    #[test]
    fn shuffled_order_is_a_permutation() {
        let bank = QuestionBank::sample();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let order = SessionOrder::build(&bank, OrderOptions::default(), &mut rng);
            let mut questions = order.questions.clone();
            questions.sort_unstable();
            assert_eq!(questions, vec![0, 1]);

            let mut labels = order.options[1].clone();
            labels.sort();
            assert_eq!(labels, vec![OptionLabel::A, OptionLabel::B, OptionLabel::C]);
        }
    }

    #[test]
    fn empty_bank_yields_empty_order() {
        let order = SessionOrder::build(
            &QuestionBank::default(),
            OrderOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(order.len(), 0);
        assert!(order.options.is_empty());
    }
}
