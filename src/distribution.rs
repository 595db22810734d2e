//! Sums of record amounts per category or payment method, for the pie charts
//! and "top" lists on the glance page.

use crate::{
    record::{Earning, Expense, Record},
    taxonomy::Taxonomy,
};

/// Sum the amounts of `records` for each member of `taxonomy`.
///
/// The output is parallel to `taxonomy`. Records whose `key` is `None`, or is
/// not in `taxonomy`, are left out.
pub fn sum_by_key<R, T>(records: &[R], taxonomy: &[T], key: impl Fn(&R) -> Option<T>) -> Vec<f64>
where
    R: Record,
    T: PartialEq,
{
    let mut sums = vec![0.0; taxonomy.len()];

    for record in records {
        let Some(record_key) = key(record) else {
            continue;
        };

        if let Some(index) = taxonomy.iter().position(|member| *member == record_key) {
            let amount = record.amount();
            sums[index] += if amount.is_finite() { amount } else { 0.0 };
        }
    }

    sums
}

/// Pair each taxonomy member with its sum, dropping the pairs whose sum is
/// not positive.
///
/// Labels and amounts are filtered together so they stay aligned.
pub fn non_zero_slices<T: Copy>(taxonomy: &[T], sums: &[f64]) -> Vec<(T, f64)> {
    taxonomy
        .iter()
        .copied()
        .zip(sums.iter().copied())
        .filter(|(_, amount)| *amount > 0.0)
        .collect()
}

/// The `n` largest slices, largest first. Equal amounts keep their input order.
pub fn top_n<T: Copy>(slices: &[(T, f64)], n: usize) -> Vec<(T, f64)> {
    let mut ranked = slices.to_vec();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    ranked.truncate(n);

    ranked
}

/// The sums of a list of records over one taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<T> {
    sums: Vec<f64>,
    slices: Vec<(T, f64)>,
}

impl<T: Taxonomy> Distribution<T> {
    /// Sum `records` by the taxonomy member `key` returns for each record.
    pub fn of<R: Record>(records: &[R], key: impl Fn(&R) -> Option<T>) -> Self {
        let unknown = records.iter().filter(|record| key(*record).is_none()).count();
        if unknown > 0 {
            tracing::warn!(
                "{unknown} of {} records have no valid {}, leaving them out of the chart",
                records.len(),
                T::NAME
            );
        }

        let sums = sum_by_key(records, T::ALL, key);
        let slices = non_zero_slices(T::ALL, &sums);

        Self { sums, slices }
    }

    /// One sum per taxonomy member, in taxonomy order.
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// The members with a positive sum, in taxonomy order.
    pub fn slices(&self) -> &[(T, f64)] {
        &self.slices
    }

    /// The `n` members with the largest sums.
    pub fn top(&self, n: usize) -> Vec<(T, f64)> {
        top_n(&self.slices, n)
    }

    /// Whether every sum is zero.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Total earnings, total expenses and the difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub earnings: f64,
    pub expenses: f64,
}

impl Totals {
    /// Sum every record, whatever its category or date.
    pub fn new(earnings: &[Earning], expenses: &[Expense]) -> Self {
        Self {
            earnings: earnings.iter().map(Record::amount).sum(),
            expenses: expenses.iter().map(Record::amount).sum(),
        }
    }

    /// Earnings minus expenses.
    pub fn net_balance(&self) -> f64 {
        self.earnings - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::{Distribution, Totals, non_zero_slices, sum_by_key, top_n};
    use crate::{
        record::{
            Expense,
            test_utils::{earning, expense},
        },
        taxonomy::{ExpenseCategory, PaymentMethod, Taxonomy},
    };

    #[test]
    fn sums_amounts_per_category() {
        let expenses = vec![
            expense("1", 10.0, None, "Food"),
            expense("2", 5.0, None, "Food"),
            expense("3", 20.0, None, "Shopping"),
        ];

        let sums = sum_by_key(&expenses, ExpenseCategory::ALL, Expense::category_key);

        assert_eq!(sums.len(), ExpenseCategory::ALL.len());
        for (category, sum) in ExpenseCategory::ALL.iter().zip(&sums) {
            let expected = match category {
                ExpenseCategory::Food => 15.0,
                ExpenseCategory::Shopping => 20.0,
                _ => 0.0,
            };
            assert_eq!(*sum, expected, "wrong sum for {category}");
        }
    }

    #[test]
    fn drops_records_outside_the_taxonomy() {
        let expenses = vec![
            expense("1", 10.0, None, "Food"),
            expense("2", 99.0, None, "Space Travel"),
            expense("3", 4.0, None, "Taxes"),
        ];

        let sums = sum_by_key(&expenses, ExpenseCategory::ALL, Expense::category_key);

        assert_eq!(sums.len(), ExpenseCategory::ALL.len());
        assert_eq!(sums.iter().sum::<f64>(), 14.0);
    }

    #[test]
    fn output_length_matches_a_partial_taxonomy() {
        let expenses = vec![expense("1", 10.0, None, "Food")];
        let taxonomy = [ExpenseCategory::Taxes, ExpenseCategory::Food];

        let sums = sum_by_key(&expenses, &taxonomy, Expense::category_key);

        assert_eq!(sums, vec![0.0, 10.0]);
    }

    #[test]
    fn non_zero_slices_keep_labels_aligned() {
        let taxonomy = ["a", "b", "c", "d"];
        let sums = [0.0, 3.0, 0.0, 1.5];

        assert_eq!(non_zero_slices(&taxonomy, &sums), vec![("b", 3.0), ("d", 1.5)]);
    }

    #[test]
    fn top_n_is_stable_for_ties() {
        let slices = vec![("a", 5.0), ("b", 9.0), ("c", 5.0), ("d", 1.0), ("e", 5.0)];

        assert_eq!(top_n(&slices, 3), vec![("b", 9.0), ("a", 5.0), ("c", 5.0)]);
        assert_eq!(top_n(&slices, 10).len(), 5);
    }

    #[test]
    fn distribution_by_payment_method() {
        let mut card = expense("1", 12.0, None, "Food");
        card.payment_method = "Credit Card".to_owned();
        let cash = expense("2", 3.0, None, "Food");
        let mut unknown = expense("3", 8.0, None, "Food");
        unknown.payment_method = "Barter".to_owned();
        let expenses = vec![card, cash, unknown];

        let distribution = Distribution::of(&expenses, Expense::payment_method_key);

        assert_eq!(
            distribution.slices(),
            &[(PaymentMethod::Cash, 3.0), (PaymentMethod::CreditCard, 12.0)]
        );
        assert_eq!(distribution.top(1), vec![(PaymentMethod::CreditCard, 12.0)]);
        assert!(!distribution.is_empty());
    }

    #[test]
    fn empty_distribution_has_zero_sums() {
        let expenses: Vec<Expense> = vec![];

        let distribution = Distribution::<ExpenseCategory>::of(&expenses, Expense::category_key);

        assert!(distribution.is_empty());
        assert_eq!(distribution.sums(), &[0.0; 11]);
    }

    #[test]
    fn totals_and_net_balance() {
        let earnings = vec![
            earning("1", 1000.0, None, "Salary"),
            earning("2", 250.0, None, "Lottery"),
        ];
        let expenses = vec![expense("3", 400.0, None, "Food")];

        let totals = Totals::new(&earnings, &expenses);

        assert_eq!(totals.earnings, 1250.0);
        assert_eq!(totals.expenses, 400.0);
        assert_eq!(totals.net_balance(), 850.0);
    }
}
