//! The closed sets of labels used to categorise earnings and expenses.
//!
//! The backend stores categories and payment methods as plain strings. These
//! enums are the only values the app will send to the backend, and they are
//! the keys used when summing amounts for the distribution charts.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A fixed, ordered set of labels.
///
/// The order of [Taxonomy::ALL] is the order used for chart slices and for
/// breaking ties when ranking slices by amount.
pub trait Taxonomy: Copy + Eq + Display + FromStr + 'static {
    /// Every member of the taxonomy in display order.
    const ALL: &'static [Self];

    /// A human readable name for the taxonomy itself, e.g. "expense category".
    const NAME: &'static str;

    /// The label the backend uses for this member.
    fn label(self) -> &'static str;

    /// Look up a member by its exact (case-sensitive) label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.label() == label)
    }
}

/// The error returned when a string is not a label of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{value}\" is not a valid {taxonomy}")]
pub struct ParseTaxonomyError {
    /// The name of the taxonomy, e.g. "payment method".
    pub taxonomy: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident, $display_name:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl Taxonomy for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const NAME: &'static str = $display_name;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseTaxonomyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| ParseTaxonomyError {
                    taxonomy: $display_name,
                    value: s.to_owned(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

taxonomy! {
    /// What an expense was spent on.
    ExpenseCategory, "expense category" {
        Food => "Food",
        Transportation => "Transportation",
        Healthcare => "Healthcare",
        Entertainment => "Entertainment",
        Education => "Education",
        Groceries => "Groceries",
        Insurance => "Insurance",
        Shopping => "Shopping",
        Utilities => "Utilities",
        Taxes => "Taxes",
        Miscellaneous => "Miscellaneous",
    }
}

taxonomy! {
    /// Where an earning came from.
    EarningCategory, "earning category" {
        ClientPayment => "Client Payment",
        ProjectCompletion => "Project Completion",
        FreelanceWork => "Freelance Work",
        RoyaltyIncome => "Royalty Income",
        Salary => "Salary",
        Business => "Business",
        Freelancing => "Freelancing",
        Investments => "Investments",
        InterestIncome => "Interest Income",
        RentalIncome => "Rental Income",
        Royalties => "Royalties",
        Gifts => "Gifts",
        Refunds => "Refunds",
        SellingItems => "Selling Items",
        Bonus => "Bonus",
        Commission => "Commission",
        Dividends => "Dividends",
        Other => "Other",
    }
}

taxonomy! {
    /// How an expense was paid.
    PaymentMethod, "payment method" {
        Cash => "Cash",
        CreditCard => "Credit Card",
        DebitCard => "Debit Card",
        Upi => "UPI",
        NetBanking => "Net Banking",
        Wallet => "Wallet",
        BankTransfer => "Bank Transfer",
        Cheque => "Cheque",
    }
}

#[cfg(test)]
mod tests {
    use super::{EarningCategory, ExpenseCategory, ParseTaxonomyError, PaymentMethod, Taxonomy};

    #[test]
    fn taxonomies_have_expected_sizes() {
        assert_eq!(ExpenseCategory::ALL.len(), 11);
        assert_eq!(EarningCategory::ALL.len(), 18);
        assert_eq!(PaymentMethod::ALL.len(), 8);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for category in ExpenseCategory::ALL {
            assert_eq!(category.label().parse::<ExpenseCategory>(), Ok(*category));
        }

        assert_eq!("Credit Card".parse(), Ok(PaymentMethod::CreditCard));
        assert_eq!("Selling Items".parse(), Ok(EarningCategory::SellingItems));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let got = "food".parse::<ExpenseCategory>();

        assert_eq!(
            got,
            Err(ParseTaxonomyError {
                taxonomy: "expense category",
                value: "food".to_owned(),
            })
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&PaymentMethod::NetBanking).unwrap();
        assert_eq!(json, "\"Net Banking\"");

        let method: PaymentMethod = serde_json::from_str("\"UPI\"").unwrap();
        assert_eq!(method, PaymentMethod::Upi);
    }

    #[test]
    fn deserializing_unknown_label_fails() {
        let result = serde_json::from_str::<EarningCategory>("\"Lottery\"");
        assert!(result.is_err());
    }
}
