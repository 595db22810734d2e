//! Which record form, if any, is open on a list page.

use serde::Deserialize;

use crate::record::{Draft, Record, RecordId};

/// The query parameters that open a form: `?create=true` or `?edit={id}`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ModalQuery {
    #[serde(default)]
    pub create: Option<bool>,
    #[serde(default)]
    pub edit: Option<String>,
}

/// The state of the record form on a list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState<D> {
    #[default]
    Closed,
    /// Creating a new record.
    Create(D),
    /// Editing the record `id`.
    Edit { id: RecordId, draft: D },
}

impl<D: Draft> ModalState<D> {
    /// Decode the modal from the query, prefilling the edit form from the
    /// matching record in `records`.
    ///
    /// Editing a record that is not in `records` leaves the modal closed.
    pub fn from_query<'a>(
        query: &ModalQuery,
        records: impl IntoIterator<Item = &'a D::Record>,
    ) -> Self
    where
        D::Record: Record + 'a,
    {
        if let Some(id) = query.edit.as_deref().filter(|id| !id.is_empty()) {
            return match records.into_iter().find(|record| record.id().as_str() == id) {
                Some(record) => ModalState::Edit {
                    id: RecordId::new(id),
                    draft: D::from_record(record),
                },
                None => {
                    tracing::warn!("cannot edit unknown record {id}");
                    ModalState::Closed
                }
            };
        }

        if query.create == Some(true) {
            return ModalState::Create(D::default());
        }

        ModalState::Closed
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{ModalQuery, ModalState};
    use crate::record::{Draft, Earning, EarningDraft, RecordId, test_utils::earning};

    fn records() -> Vec<Earning> {
        vec![earning("a1", 120.0, Some(date!(2024 - 03 - 04)), "Salary")]
    }

    fn decode(query: ModalQuery) -> ModalState<EarningDraft> {
        let records = records();
        ModalState::from_query(&query, &records)
    }

    #[test]
    fn no_query_is_closed() {
        assert_eq!(decode(ModalQuery::default()), ModalState::Closed);
    }

    #[test]
    fn create_opens_an_empty_form() {
        let state = decode(ModalQuery {
            create: Some(true),
            edit: None,
        });

        assert_eq!(state, ModalState::Create(EarningDraft::default()));
        assert!(state.is_open());
    }

    #[test]
    fn edit_prefills_from_record() {
        let state = decode(ModalQuery {
            create: None,
            edit: Some("a1".to_owned()),
        });

        assert_eq!(
            state,
            ModalState::Edit {
                id: RecordId::new("a1"),
                draft: EarningDraft::from_record(&records()[0]),
            }
        );
    }

    #[test]
    fn edit_of_unknown_record_is_closed() {
        let state = decode(ModalQuery {
            create: Some(true),
            edit: Some("missing".to_owned()),
        });

        assert_eq!(state, ModalState::Closed);
    }
}
